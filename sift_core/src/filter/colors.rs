//! Color palette for filter pills and options

/// Immutable palette cycled through when callers do not assign explicit
/// option colors.
pub const COLOR_PALETTE: &[&str] = &[
    "#0ea5e9", // sky
    "#8b5cf6", // violet
    "#f59e0b", // amber
    "#10b981", // emerald
    "#ef4444", // red
    "#6366f1", // indigo
    "#14b8a6", // teal
    "#ec4899", // pink
];

/// Look up a palette color by index, wrapping around the table.
pub fn color_for(index: usize) -> &'static str {
    COLOR_PALETTE[index % COLOR_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_wraps() {
        assert_eq!(color_for(0), COLOR_PALETTE[0]);
        assert_eq!(color_for(COLOR_PALETTE.len()), COLOR_PALETTE[0]);
        assert_eq!(color_for(COLOR_PALETTE.len() + 3), COLOR_PALETTE[3]);
    }
}
