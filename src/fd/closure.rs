use super::{Attribute, AttributeSet, FunctionalDependency};

/// Compute the closure of `attrs` under `fds`.
///
/// Every dependency whose LHS is already derived contributes its RHS, until a full scan
/// over `fds` adds nothing.
///
/// Every LHS in `fds` must be non-empty. Validated schemas and [`minimal_cover`] output
/// satisfy this; debug builds panic otherwise.
///
/// [`minimal_cover`]: super::minimal_cover
pub fn closure<T: Attribute>(
    attrs: &AttributeSet<T>,
    fds: &[FunctionalDependency<T>],
) -> AttributeSet<T> {
    debug_assert!(
        fds.iter().all(|fd| !fd.lhs.is_empty()),
        "closure over a dependency with an empty left-hand side"
    );
    closure_with(attrs, fds.iter())
}

/// Same as [`closure`], over any re-iterable sequence of dependencies.
///
/// Lets callers leave one dependency out without building a new set.
pub(crate) fn closure_with<'a, T, I>(attrs: &AttributeSet<T>, fds: I) -> AttributeSet<T>
where
    T: Attribute + 'a,
    I: Iterator<Item = &'a FunctionalDependency<T>> + Clone,
{
    let mut result = attrs.0.clone();
    loop {
        let mut changed = false;
        for fd in fds.clone() {
            if fd.lhs.is_subset(&result) && !fd.rhs.is_subset(&result) {
                result.extend(fd.rhs.iter().cloned());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    AttributeSet(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        attrs, fds,
        tests::{attr_set_strategy, fd_set_strategy},
    };
    use proptest::prelude::*;

    #[test]
    fn test_closure() {
        let fds = fds!(A => B, B => C, C D => E);
        assert_eq!(attrs!(A B C), closure(&attrs!(A), &fds));
        assert_eq!(attrs!(A B C D E), closure(&attrs!(A D), &fds));
        assert_eq!(attrs!(D), closure(&attrs!(D), &fds));
        assert_eq!(attrs!(), closure(&attrs!(), &fds));
    }

    #[test]
    fn test_closure_needs_several_scans() {
        // C D => E only fires once B => C has, which comes later in the list.
        let fds = fds!(C D => E, B => C, A => B);
        assert_eq!(attrs!(A B C D E), closure(&attrs!(A D), &fds));
    }

    #[test]
    fn test_closure_multi_rhs() {
        let fds = fds!(A => B C, C => D);
        assert_eq!(attrs!(A B C D), closure(&attrs!(A), &fds));
    }

    #[test]
    fn test_closure_without_fds() {
        assert_eq!(attrs!(A B), closure(&attrs!(A B), &fds!()));
    }

    #[test]
    fn test_closure_with_skips_excluded() {
        let fds = fds!(A => B, B => C);
        let without_first = fds.iter().skip(1);
        assert_eq!(attrs!(A), closure_with(&attrs!(A), without_first));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty left-hand side")]
    fn test_closure_rejects_empty_lhs() {
        let fds = vec![FunctionalDependency::new(attrs!(), attrs!(A))];
        closure(&attrs!(B), &fds);
    }

    proptest! {
        #[test]
        fn test_closure_is_extensive_and_idempotent(
            x in attr_set_strategy(),
            fds in fd_set_strategy(),
        ) {
            let c = closure(&x, &fds);
            prop_assert!(x.is_subset(&c));
            prop_assert_eq!(&c, &closure(&c, &fds));
        }

        #[test]
        fn test_closure_is_monotone(
            x in attr_set_strategy(),
            y in attr_set_strategy(),
            fds in fd_set_strategy(),
        ) {
            let union = &x | &y;
            prop_assert!(closure(&x, &fds).is_subset(&closure(&union, &fds)));
        }
    }
}
