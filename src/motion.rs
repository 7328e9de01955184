use once_cell::sync::OnceCell;
use web_sys::ScrollBehavior;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

static REDUCED_MOTION: OnceCell<bool> = OnceCell::new();

/// Whether the user asked the platform to minimize animation.
/// Queried once; the answer holds for the lifetime of the page.
pub fn prefers_reduced_motion() -> bool {
    *REDUCED_MOTION.get_or_init(|| {
        let reduced = web_sys::window()
            .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
            .map(|list| list.matches())
            .unwrap_or(false);
        log::debug!("prefers-reduced-motion: {}", reduced);
        reduced
    })
}

/// Decorative motion (hover transforms, parallax) only runs when the user
/// has not asked for reduced motion.
pub fn decorations_enabled(reduced: bool) -> bool {
    !reduced
}

pub fn scroll_behavior(reduced: bool) -> ScrollBehavior {
    if reduced {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    }
}
