//! SVG post-processing.

/// Drop the XML prolog and DOCTYPE so the SVG can be embedded in a page.
///
/// Input without an `<svg` element is returned unchanged.
pub fn strip_prolog(svg: &[u8]) -> Vec<u8> {
    match svg.windows(4).position(|w| w == b"<svg") {
        Some(start) => svg[start..].to_vec(),
        None => svg.to_vec(),
    }
}
