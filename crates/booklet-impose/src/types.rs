use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("Source document has no pages")]
    EmptyDocument,
    #[error("Failed to decode source document: {0}")]
    Decode(#[source] lopdf::Error),
    #[error("Imposition failed on sheet {sheet} ({side}): {source}")]
    ImpositionFailed {
        sheet: usize,
        side: SheetSide,
        #[source]
        source: lopdf::Error,
    },
    #[error("Failed to encode output document: {0}")]
    Encode(String),
    #[error("Imposition cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

impl fmt::Display for SheetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSide::Front => f.write_str("front"),
            SheetSide::Back => f.write_str("back"),
        }
    }
}

/// Width and height of a page in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

impl PageDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether two pages have the same size, within a hundredth of a point
    pub fn approx_eq(&self, other: &PageDimensions) -> bool {
        (self.width - other.width).abs() < 0.01 && (self.height - other.height).abs() < 0.01
    }
}

/// Two indices into the normalized page sequence, drawn side by side on one sheet side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePairing {
    pub left: usize,
    pub right: usize,
}

impl PagePairing {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

/// Both sides of one physical sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetPairing {
    /// Position of the sheet in the collated stack (0 = outermost)
    pub sheet: usize,
    pub front: PagePairing,
    pub back: PagePairing,
}

impl SheetPairing {
    pub fn side(&self, side: SheetSide) -> PagePairing {
        match side {
            SheetSide::Front => self.front,
            SheetSide::Back => self.back,
        }
    }
}

/// A point in PDF user space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Strictly inside the rectangle; points on the boundary are not contained
    pub fn contains_strictly(&self, point: Point) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.top()
    }
}

/// RGB stroke color, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// A drawable line segment used for fold and trim marks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropMarkSegment {
    pub start: Point,
    pub end: Point,
    pub thickness: f32,
    pub color: Color,
}

/// Counts reported back to the caller after an imposition run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpositionSummary {
    /// Pages in the source document
    pub source_pages: usize,
    /// Page count after padding to a multiple of 4
    pub normalized_page_count: usize,
    /// Number of blank pages appended for padding
    pub blank_pages_added: usize,
    /// Physical sheets (each carries 4 logical pages)
    pub total_sheets: usize,
    /// Pages in the output document (front and back of each sheet)
    pub output_pages: usize,
}
