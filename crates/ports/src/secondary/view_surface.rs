/// The page surface a view renders into: named fragment containers plus
/// named text slots for stat tiles. Stands in for the DOM root so views
/// can be exercised without a live page.
pub trait ViewSurface: Send + Sync {
    /// Replace the entire content of a container with a markup fragment.
    fn replace_content(&self, container_id: &str, html: &str);

    /// Set the text of a stat slot.
    fn set_text(&self, element_id: &str, text: &str);
}
