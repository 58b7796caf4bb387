//! Viewport scanner: which section is "in view" right now.

use folio_platform::GeometryProvider;
use folio_types::SectionId;
use folio_types::config::ACTIVATION_THRESHOLD;

/// Return the first section in `order` whose top edge is at or above the
/// activation line (150 px below the viewport top), or `home` if none is.
///
/// Order decides ties: the first qualifying entry wins regardless of how
/// far past the line each candidate is. With [`SectionId::SCAN_ORDER`]
/// (bottom-most first) this picks the lowest section whose top has crossed
/// the line. Sections with no mounted element are skipped.
pub fn detect_section_in_view<G>(order: &[SectionId], geometry: &G) -> SectionId
where
    G: GeometryProvider + ?Sized,
{
    detect_section_in_view_with(order, geometry, ACTIVATION_THRESHOLD)
}

/// [`detect_section_in_view`] with an explicit activation threshold.
pub fn detect_section_in_view_with<G>(order: &[SectionId], geometry: &G, threshold: f32) -> SectionId
where
    G: GeometryProvider + ?Sized,
{
    for &section in order {
        let Some(top) = geometry.element_top(section.as_str()) else {
            continue;
        };
        if top <= threshold {
            return section;
        }
    }
    SectionId::Home
}
