//! Operation naming rules.
//!
//! Element operations are named `<role><Element>`: `beginParagraph`,
//! `endParagraph`, `onWord`. Prefixes are tested in `begin`, `end`, `on` order,
//! so a name such as `endless` reads as role `end` with element `less`.

use serde::Serialize;
use std::fmt;

pub const PREFIX_BEGIN: &str = "begin";
pub const PREFIX_END: &str = "end";
pub const PREFIX_ON: &str = "on";

/// Role an operation plays for its element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Begin,
    End,
    On,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Begin, Role::End, Role::On];

    pub fn prefix(self) -> &'static str {
        match self {
            Role::Begin => PREFIX_BEGIN,
            Role::End => PREFIX_END,
            Role::On => PREFIX_ON,
        }
    }

    /// Role encoded in an operation name, if it carries a recognized prefix.
    pub fn of_operation(name: &str) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| name.starts_with(role.prefix()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Split an operation name into its role and element name.
///
/// The element name is the remainder after the prefix with its first
/// character lower-cased. Returns `None` for names without a recognized prefix
/// and for bare prefixes (`on`, `begin`).
pub fn split_operation_name(name: &str) -> Option<(Role, String)> {
    let role = Role::of_operation(name)?;
    let rest = &name[role.prefix().len()..];
    let mut chars = rest.chars();
    let first = chars.next()?;
    let mut element: String = first.to_lowercase().collect();
    element.push_str(chars.as_str());
    Some((role, element))
}

/// Element name an operation targets, or `None` when it is not an element
/// operation.
pub fn element_name(operation: &str) -> Option<String> {
    split_operation_name(operation).map(|(_, element)| element)
}
