//! Container validators: object, array, set and map.
//!
//! Composites delegate to child schemas and push a path segment for
//! each child. A container of the wrong type reports one `invalid_type`
//! issue; otherwise every child is checked and every issue collected.

mod array;
mod map;
mod object;
mod set;

use crate::error::Issue;

pub use array::ArraySchema;
pub use map::MapSchema;
pub use object::ObjectSchema;
pub use set::SetSchema;

/// Element-count constraint shared by arrays and sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SizeCheck {
    Min(usize),
    Max(usize),
    Exact(usize),
}

impl SizeCheck {
    /// `label` names the container in the message (`Array`, `Set`).
    fn test(self, label: &str, len: usize) -> Option<Issue> {
        match self {
            Self::Min(min) => (len < min).then(|| {
                Issue::too_small(min, format!("{label} must contain at least {min} element(s)"))
            }),
            Self::Max(max) => (len > max).then(|| {
                Issue::too_big(max, format!("{label} must contain at most {max} element(s)"))
            }),
            Self::Exact(exact) => {
                let message = || format!("{label} must contain exactly {exact} element(s)");
                if len < exact {
                    Some(Issue::too_small(exact, message()))
                } else if len > exact {
                    Some(Issue::too_big(exact, message()))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;

    #[test]
    fn size_messages_name_the_container() {
        let issue = SizeCheck::Min(2).test("Set", 1).unwrap();
        assert_eq!(issue.code, IssueCode::TooSmall);
        assert_eq!(issue.message, "Set must contain at least 2 element(s)");

        let issue = SizeCheck::Exact(2).test("Array", 3).unwrap();
        assert_eq!(issue.code, IssueCode::TooBig);
        assert_eq!(issue.message, "Array must contain exactly 2 element(s)");

        assert!(SizeCheck::Max(2).test("Array", 2).is_none());
    }
}
