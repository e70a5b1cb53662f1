//! Geometry APIs
//!
//! DOMRect, client rect lists and the offset box an embedder's layout
//! assigns to an element.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// DOMRectList - result of getClientRects()
#[derive(Debug, Clone, Default)]
pub struct DOMRectList {
    rects: Vec<DOMRect>,
}

impl DOMRectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn push(&mut self, rect: DOMRect) {
        self.rects.push(rect);
    }
}

/// Offset box of an element, relative to its offset parent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl ElementGeometry {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            offset_width: width,
            offset_height: height,
            ..Default::default()
        }
    }

    pub fn bounding_client_rect(&self) -> DOMRect {
        DOMRect::from_xywh(
            self.offset_left,
            self.offset_top,
            self.offset_width,
            self.offset_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_list() {
        let mut rects = DOMRectList::new();
        assert!(rects.is_empty());
        rects.push(DOMRect::from_xywh(0.0, 0.0, 800.0, 0.0));
        assert!(!rects.is_empty());
    }

    #[test]
    fn test_bounding_rect_from_offsets() {
        let geo = ElementGeometry {
            offset_top: 5.0,
            offset_left: 3.0,
            offset_width: 40.0,
            offset_height: 20.0,
        };
        assert_eq!(geo.bounding_client_rect(), DOMRect::from_xywh(3.0, 5.0, 40.0, 20.0));
    }
}
