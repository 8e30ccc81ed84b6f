//! Class-conflict resolution for layout utility classes
//!
//! The canvas runs in absolute-positioning drag mode. A handful of utility
//! classes fight that mode: width-constraining utilities re-center or cap
//! the element and auto margins override the dragged position. Composing a
//! block's class list therefore filters the requested set against a fixed
//! deny-list.
//!
//! This is a pure, total function: no error paths, original ordering
//! preserved, idempotent.

/// Utility classes that conflict with absolute-positioning drag mode
const CONFLICTING_CLASSES: &[&str] = &["container", "mx-auto", "w-full", "w-screen"];

fn conflicts_with_drag_mode(class: &str) -> bool {
    CONFLICTING_CLASSES.contains(&class) || class.starts_with("max-w-")
}

/// Remove deny-listed classes from a requested class set.
///
/// Non-conflicting classes keep their original order; duplicates are kept
/// as-is (the canvas tolerates them).
pub fn resolve_class_conflicts<'a, I>(requested: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    requested
        .into_iter()
        .filter(|class| !conflicts_with_drag_mode(class))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removes_denied_classes() {
        let resolved = resolve_class_conflicts(vec![
            "bg-white",
            "max-w-md",
            "p-6",
            "mx-auto",
            "rounded-lg",
        ]);
        assert_eq!(resolved, vec!["bg-white", "p-6", "rounded-lg"]);
    }

    #[test]
    fn test_preserves_order_of_survivors() {
        let resolved = resolve_class_conflicts(vec!["z-10", "container", "a", "w-full", "b"]);
        assert_eq!(resolved, vec!["z-10", "a", "b"]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec!["grid", "max-w-lg", "gap-4", "mx-auto"];
        let once = resolve_class_conflicts(input);
        let twice = resolve_class_conflicts(once.iter().map(String::as_str));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_and_clean_inputs() {
        assert!(resolve_class_conflicts(std::iter::empty()).is_empty());

        let clean = resolve_class_conflicts(vec!["p-4", "text-center"]);
        assert_eq!(clean, vec!["p-4", "text-center"]);
    }

    #[test]
    fn test_max_width_family() {
        let resolved = resolve_class_conflicts(vec!["max-w-sm", "max-w-7xl", "max-h-full"]);
        // Only the width constraints are denied.
        assert_eq!(resolved, vec!["max-h-full"]);
    }
}
