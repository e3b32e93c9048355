/// Ensures an anchor is in `#fragment` form; empty input stays empty.
pub fn normalize_anchor(anchor: &str) -> String {
    let trimmed = anchor.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        trimmed.to_owned()
    } else {
        format!("#{trimmed}")
    }
}

/// Points the host page at the anchor. Native builds have no page to
/// move, so the target is only logged; the HUD shows it as well.
pub fn navigate(anchor: &str) {
    if anchor.is_empty() {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(anchor) {
                log::error!("failed to set location hash: {e:?}");
                return;
            }
        }
    }

    log::info!("navigate -> {anchor}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_missing_hash() {
        assert_eq!(normalize_anchor("about-me"), "#about-me");
        assert_eq!(normalize_anchor("#about-me"), "#about-me");
        assert_eq!(normalize_anchor("  #web-development "), "#web-development");
        assert_eq!(normalize_anchor(""), "");
    }
}
