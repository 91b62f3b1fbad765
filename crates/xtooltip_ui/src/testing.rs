//! In-memory host and anchor for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use xtooltip_core::{Point, Rect, Size, TooltipError};

use crate::host::{AnchorView, ContentView, PopupLayoutParams, TooltipHost};

#[derive(Debug, Default)]
struct Record {
    added: Vec<PopupLayoutParams>,
    removed: Vec<PopupLayoutParams>,
    measured: Vec<String>,
    refuse: bool,
}

/// Host that records every call. Clones share the same record.
#[derive(Debug, Clone)]
pub struct FakeHost {
    record: Rc<RefCell<Record>>,
    frame: Rect,
    text_size: Size,
    density: f64,
}

impl FakeHost {
    /// 1080x1920 screen, text measured at 184x64.
    pub fn new() -> Self {
        Self {
            record: Rc::default(),
            frame: Rect::new(0, 0, 1080, 1920),
            text_size: Size::new(184, 64),
            density: 1.0,
        }
    }

    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_text_size(mut self, size: Size) -> Self {
        self.text_size = size;
        self
    }

    pub fn refuse_popups(&self) {
        self.record.borrow_mut().refuse = true;
    }

    pub fn added(&self) -> Vec<PopupLayoutParams> {
        self.record.borrow().added.clone()
    }

    pub fn removed(&self) -> Vec<PopupLayoutParams> {
        self.record.borrow().removed.clone()
    }

    pub fn measured(&self) -> Vec<String> {
        self.record.borrow().measured.clone()
    }
}

impl TooltipHost for FakeHost {
    fn visible_display_frame(&self) -> Rect {
        self.frame
    }

    fn density(&self) -> f64 {
        self.density
    }

    fn measure_content(&mut self, content: &ContentView) -> Size {
        self.record.borrow_mut().measured.push(content.text.clone());
        self.text_size
    }

    fn add_popup(&mut self, params: &PopupLayoutParams) -> Result<(), TooltipError> {
        let mut record = self.record.borrow_mut();
        if record.refuse {
            return Err(TooltipError::window("window surface refused the popup"));
        }
        record.added.push(params.clone());
        Ok(())
    }

    fn remove_popup(&mut self, params: &PopupLayoutParams) {
        self.record.borrow_mut().removed.push(params.clone());
    }
}

/// Anchor view whose location tests can move.
#[derive(Debug)]
pub struct FakeAnchor {
    location: Cell<Point>,
    size: Size,
    attached: Cell<bool>,
}

impl FakeAnchor {
    pub fn move_to(&self, x: i32, y: i32) {
        self.location.set(Point::new(x, y));
    }

    pub fn detach(&self) {
        self.attached.set(false);
    }
}

impl AnchorView for FakeAnchor {
    fn location_on_screen(&self) -> Point {
        self.location.get()
    }

    fn size(&self) -> Size {
        self.size
    }

    fn is_attached_to_window(&self) -> bool {
        self.attached.get()
    }
}

/// A 100x40 anchor with its top-left at `(x, y)`.
pub fn anchor(x: i32, y: i32) -> Rc<FakeAnchor> {
    Rc::new(FakeAnchor {
        location: Cell::new(Point::new(x, y)),
        size: Size::new(100, 40),
        attached: Cell::new(true),
    })
}
