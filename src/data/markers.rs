// ============================================================
// Layer 4 — Entity-Type Markers
// ============================================================
// Cloze questions carry exactly one marker where the answer was cut
// out of the summary sentence: either a concrete entity type
// ("PERSON", "LOCATION", ...) or the generic placeholder used by the
// non-entity span layers.
//
// Marker order is configuration order and is significant: the first
// marker found in a question decides where it is split. The right
// anchor stops at a second occurrence of the same marker.

use crate::domain::brackets::{normalize, NormalizedText};

#[derive(Debug, Clone)]
pub struct EntityMarkers {
    markers:     Vec<NormalizedText>,
    placeholder: NormalizedText,
}

impl EntityMarkers {
    /// `markers` is the full ordered list and normally includes the
    /// placeholder itself.
    pub fn new<S: AsRef<str>>(markers: &[S], placeholder: &str) -> Self {
        Self {
            markers:     markers.iter().map(|m| normalize(m.as_ref())).collect(),
            placeholder: normalize(placeholder),
        }
    }

    pub fn placeholder(&self) -> &NormalizedText {
        &self.placeholder
    }

    /// Split `question` around the first configured marker it contains.
    ///
    /// Returns (marker, left anchor, right anchor). The right anchor runs
    /// up to the next occurrence of the marker, or to the end.
    pub fn split<'q>(
        &self,
        question: &'q NormalizedText,
    ) -> Option<(&NormalizedText, &'q str, &'q str)> {
        self.markers.iter().find_map(|marker| {
            question.split_once(marker).map(|(left, rest)| {
                let right = rest.split_once(marker.as_str()).map_or(rest, |(r, _)| r);
                (marker, left, right)
            })
        })
    }

    /// The entity type a question mentions: the last configured
    /// non-placeholder marker present in it.
    pub fn entity_type(&self, question: &NormalizedText) -> Option<&NormalizedText> {
        self.markers
            .iter()
            .filter(|m| **m != self.placeholder && question.contains(m.as_str()))
            .last()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> EntityMarkers {
        EntityMarkers::new(&["PERSON", "LOCATION", "PLACEHOLDER"], "PLACEHOLDER")
    }

    #[test]
    fn test_split_at_first_occurrence() {
        let q = normalize("Ông PERSON sinh tại LOCATION năm 1990");
        let m = markers();
        let (marker, left, right) = m.split(&q).unwrap();
        assert_eq!(marker.as_str(), "PERSON");
        assert_eq!(left, "Ông ");
        assert_eq!(right, " sinh tại LOCATION năm 1990");
    }

    #[test]
    fn test_right_anchor_stops_at_repeated_marker() {
        let q = normalize("PERSON gặp PERSON hôm qua");
        let m = markers();
        let (_, left, right) = m.split(&q).unwrap();
        assert_eq!(left, "");
        assert_eq!(right, " gặp ");
    }

    #[test]
    fn test_split_without_marker() {
        assert!(markers().split(&normalize("no marker here")).is_none());
    }

    #[test]
    fn test_entity_type_skips_placeholder() {
        let m = markers();
        assert!(m.entity_type(&normalize("PLACEHOLDER ran")).is_none());
        assert_eq!(
            m.entity_type(&normalize("LOCATION is big")).map(NormalizedText::as_str),
            Some("LOCATION")
        );
    }

    #[test]
    fn test_entity_type_prefers_last_configured() {
        let q = normalize("PERSON went to LOCATION");
        assert_eq!(
            markers().entity_type(&q).map(NormalizedText::as_str),
            Some("LOCATION")
        );
    }
}
