use std::collections::BTreeMap;
use std::sync::Mutex;

use ports::secondary::view_surface::ViewSurface;

/// View surface that holds rendered fragments and stat texts in memory.
/// The console renders into it and reads the regions back out for
/// printing; it is the headless counterpart of the page's DOM root.
#[derive(Default)]
pub struct BufferSurface {
    contents: Mutex<BTreeMap<String, String>>,
    texts: Mutex<BTreeMap<String, String>>,
}

impl BufferSurface {
    pub fn content(&self, container_id: &str) -> Option<String> {
        self.contents
            .lock()
            .expect("surface lock")
            .get(container_id)
            .cloned()
    }

    pub fn text(&self, element_id: &str) -> Option<String> {
        self.texts
            .lock()
            .expect("surface lock")
            .get(element_id)
            .cloned()
    }

    /// Stat slots in name order, for table output.
    pub fn texts(&self) -> Vec<(String, String)> {
        self.texts
            .lock()
            .expect("surface lock")
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl ViewSurface for BufferSurface {
    fn replace_content(&self, container_id: &str, html: &str) {
        self.contents
            .lock()
            .expect("surface lock")
            .insert(container_id.to_string(), html.to_string());
    }

    fn set_text(&self, element_id: &str, text: &str) {
        self.texts
            .lock()
            .expect("surface lock")
            .insert(element_id.to_string(), text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_overwrites_the_whole_container() {
        let surface = BufferSurface::default();
        surface.replace_content("list", "<div>old</div>");
        surface.replace_content("list", "<div>new</div>");
        assert_eq!(surface.content("list").as_deref(), Some("<div>new</div>"));
    }

    #[test]
    fn unknown_region_is_none() {
        let surface = BufferSurface::default();
        assert!(surface.content("missing").is_none());
        assert!(surface.text("missing").is_none());
    }

    #[test]
    fn stat_texts_are_listed_in_name_order() {
        let surface = BufferSurface::default();
        surface.set_text("b", "2");
        surface.set_text("a", "1");
        let texts = surface.texts();
        assert_eq!(texts[0].0, "a");
        assert_eq!(texts[1].0, "b");
    }
}
