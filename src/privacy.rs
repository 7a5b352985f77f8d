// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Display policies for logged values.

Every value interpolated into a log message is [`Loggable`]: it knows a full representation and
a representation with private information redacted. Which one ends up in the record depends on
the placeholder's [`DisplayPolicy`]:

| Template          | Marker        | Policy    | Written                                   |
|-------------------|---------------|-----------|-------------------------------------------|
| `{value}`         | `%s`          | `Default` | redacted, unless private data is revealed |
| `{public: value}` | `%{public}s`  | `Public`  | always in full                            |

```
use loggable::privacy::{DisplayPolicy, Loggable, write_with_policy};

let mut out = String::new();
write_with_policy(&"alice", DisplayPolicy::Default, false, &mut out);
out.push(' ');
write_with_policy(&"alice", DisplayPolicy::Public, false, &mut out);
assert_eq!(out, "<private> alice");
```
*/

use std::fmt::{Debug, Display};

/// Written in place of a value whose private representation is withheld.
pub const REDACTED: &str = "<private>";

/// an in-progress log.
pub trait LogBuilder {
    fn write(&mut self, message: &str);
}

impl LogBuilder for String {
    fn write(&mut self, message: &str) {
        self.push_str(message);
    }
}

/// How a placeholder's value may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayPolicy {
    /// No annotation. Private information is redacted.
    #[default]
    Default,
    /// `%{public}s`: shown as-is.
    Public,
    /// `%{private}s`: redacted, same as `Default` but explicit.
    Private,
}

impl DisplayPolicy {
    /// The annotation between `%{` and `}s`, if any.
    pub const fn annotation(self) -> Option<&'static str> {
        match self {
            DisplayPolicy::Default => None,
            DisplayPolicy::Public => Some("public"),
            DisplayPolicy::Private => Some("private"),
        }
    }

    pub fn from_annotation(annotation: &str) -> Option<DisplayPolicy> {
        match annotation {
            "public" => Some(DisplayPolicy::Public),
            "private" => Some(DisplayPolicy::Private),
            _ => None,
        }
    }
}

/**
A value that can appear in a log message.

The trait is object safe; generated code passes arguments as `&dyn Loggable`.
*/
pub trait Loggable {
    /**
    Logs the object to the provided builder.

    Use the representation that makes sense for public logging.
    */
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder);

    /**
    Logs the object to the provided builder.

    Use the representation that makes sense for private logging.
    */
    fn log_all(&self, builder: &mut dyn LogBuilder);
}

/// Writes `value` the way `policy` allows. `reveal_private` overrides redaction.
pub fn write_with_policy(
    value: &dyn Loggable,
    policy: DisplayPolicy,
    reveal_private: bool,
    builder: &mut dyn LogBuilder,
) {
    match policy {
        DisplayPolicy::Public => value.log_all(builder),
        DisplayPolicy::Default | DisplayPolicy::Private => {
            if reveal_private {
                value.log_all(builder)
            } else {
                value.log_redacting_private_info(builder)
            }
        }
    }
}

//u8, bool and friends are probably not private.
macro_rules! loggable_in_public {
    ($($t:ty),*) => {$(
        impl Loggable for $t {
            #[inline]
            fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
                builder.write(&self.to_string());
            }
            #[inline]
            fn log_all(&self, builder: &mut dyn LogBuilder) {
                self.log_redacting_private_info(builder);
            }
        }
    )*};
}

//wider numbers might be private.
macro_rules! loggable_redacted {
    ($($t:ty),*) => {$(
        impl Loggable for $t {
            #[inline]
            fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
                builder.write(REDACTED);
            }
            #[inline]
            fn log_all(&self, builder: &mut dyn LogBuilder) {
                builder.write(&self.to_string());
            }
        }
    )*};
}

loggable_in_public!(u8, i8, bool, char);
loggable_redacted!(u16, u32, u64, u128, usize, i16, i32, i64, i128, isize, f32, f64);

/**
str might be private.
*/
impl Loggable for str {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        builder.write(REDACTED);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(self);
    }
}

impl Loggable for String {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        self.as_str().log_redacting_private_info(builder);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        self.as_str().log_all(builder);
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        (**self).log_redacting_private_info(builder);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        (**self).log_all(builder);
    }
}

/**
slices depend on the underlying type.
*/
impl<T: Loggable> Loggable for [T] {
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        builder.write("[");
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                builder.write(", ");
            }
            item.log_redacting_private_info(builder);
        }
        builder.write("]");
    }
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write("[");
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                builder.write(", ");
            }
            item.log_all(builder);
        }
        builder.write("]");
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        self.as_slice().log_redacting_private_info(builder);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        self.as_slice().log_all(builder);
    }
}

/**
Option depends on the underlying type.
*/
impl<T: Loggable> Loggable for Option<T> {
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        match self {
            Some(t) => {
                builder.write("Some(");
                t.log_redacting_private_info(builder);
                builder.write(")");
            }
            None => builder.write("None"),
        }
    }
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        match self {
            Some(t) => {
                builder.write("Some(");
                t.log_all(builder);
                builder.write(")");
            }
            None => builder.write("None"),
        }
    }
}

/**
Escape hatch for any `Debug` value. Treated as private.
*/
pub struct LogIt<T>(pub T);

impl<T: Debug> Loggable for LogIt<T> {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        builder.write(REDACTED);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&format!("{:?}", self.0));
    }
}

/**
Escape hatch for any `Display` value. Treated as private.
*/
pub struct Displayed<T>(pub T);

impl<T: Display> Loggable for Displayed<T> {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        builder.write(REDACTED);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        builder.write(&self.0.to_string());
    }
}

/**
Escape hatch, we promise we aren't logging private data.

Prefer `{public: value}` in the template; this is for values built up elsewhere.
*/
pub struct IPromiseItsNotPrivate<T>(pub T);

impl<T: Loggable> Loggable for IPromiseItsNotPrivate<T> {
    #[inline]
    fn log_redacting_private_info(&self, builder: &mut dyn LogBuilder) {
        self.0.log_all(builder);
    }
    #[inline]
    fn log_all(&self, builder: &mut dyn LogBuilder) {
        self.0.log_all(builder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redacted(value: &dyn Loggable) -> String {
        let mut out = String::new();
        value.log_redacting_private_info(&mut out);
        out
    }

    fn all(value: &dyn Loggable) -> String {
        let mut out = String::new();
        value.log_all(&mut out);
        out
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn small_values_are_public() {
        assert_eq!(redacted(&7u8), "7");
        assert_eq!(redacted(&-3i8), "-3");
        assert_eq!(redacted(&true), "true");
        assert_eq!(redacted(&'x'), "x");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn wider_values_are_redacted() {
        assert_eq!(redacted(&70000u32), REDACTED);
        assert_eq!(all(&70000u32), "70000");
        assert_eq!(redacted(&1.5f64), REDACTED);
        assert_eq!(all(&1.5f64), "1.5");
        assert_eq!(redacted(&"alice"), REDACTED);
        assert_eq!(all(&"alice"), "alice");
        assert_eq!(all(&String::from("bob")), "bob");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn containers() {
        let v = vec![1u8, 2, 3];
        assert_eq!(redacted(&v), "[1, 2, 3]");
        let names = vec!["a", "b"];
        assert_eq!(redacted(&names), "[<private>, <private>]");
        assert_eq!(all(&names), "[a, b]");
        assert_eq!(all(&Some(5u32)), "Some(5)");
        assert_eq!(redacted(&Some(5u32)), "Some(<private>)");
        assert_eq!(redacted(&None::<u32>), "None");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn escape_hatches() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct S(i32);
        assert_eq!(redacted(&LogIt(S(23))), REDACTED);
        assert_eq!(all(&LogIt(S(23))), "S(23)");
        assert_eq!(redacted(&Displayed(std::net::Ipv4Addr::LOCALHOST)), REDACTED);
        assert_eq!(all(&Displayed(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
        assert_eq!(redacted(&IPromiseItsNotPrivate("alice")), "alice");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
    fn policies() {
        let mut out = String::new();
        write_with_policy(&"x", DisplayPolicy::Private, false, &mut out);
        write_with_policy(&"y", DisplayPolicy::Public, false, &mut out);
        write_with_policy(&"z", DisplayPolicy::Default, true, &mut out);
        assert_eq!(out, "<private>yz");
        assert_eq!(DisplayPolicy::from_annotation("public"), Some(DisplayPolicy::Public));
        assert_eq!(DisplayPolicy::from_annotation("secret"), None);
        assert_eq!(DisplayPolicy::Default.annotation(), None);
    }
}
