//! Path geometry: parsing SVG path data, sampling it into polylines and
//! writing polylines back as path data.

use lyon_geom::{
    point, vector, Angle, Arc, ArcFlags, CubicBezierSegment, LineSegment, Point,
    QuadraticBezierSegment, SvgArc,
};
use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

use super::matrix::Matrix;

/// Samples per segment when none is configured
pub const DEFAULT_STEPS: u32 = 20;

/// Decimal places kept when writing coordinates
pub const DEFAULT_PRECISION: usize = 4;

/// Error type for path data
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PathError {
    /// Path data does not follow the SVG grammar
    #[error("invalid path data: {0}")]
    Parse(#[from] svgtypes::Error),
}

/// One drawable piece of a subpath, in absolute coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
}

impl Segment {
    /// Point at parameter `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Point<f64> {
        match self {
            Segment::Line(s) => s.sample(t),
            Segment::Quadratic(s) => s.sample(t),
            Segment::Cubic(s) => s.sample(t),
            Segment::Arc(s) => s.sample(t),
        }
    }

    pub fn to(&self) -> Point<f64> {
        match self {
            Segment::Line(s) => s.to,
            Segment::Quadratic(s) => s.to,
            Segment::Cubic(s) => s.to,
            Segment::Arc(s) => s.to(),
        }
    }
}

/// Segments joined end to end, starting at `start`
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub start: Point<f64>,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl SubPath {
    fn new(start: Point<f64>) -> Self {
        Self { start, segments: Vec::new(), closed: false }
    }

    fn end(&self) -> Point<f64> {
        self.segments.last().map_or(self.start, Segment::to)
    }
}

/// Parsed path geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub subpaths: Vec<SubPath>,
}

/// Sampled outline of one subpath
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
}

impl Polyline {
    /// Map every point through `matrix`.
    pub fn transform(&mut self, matrix: &Matrix) {
        for p in &mut self.points {
            *p = matrix.apply(p.0, p.1);
        }
    }
}

/// Elliptical arc between two points, falling back to a line when the radii
/// cannot describe a curve.
fn arc_segment(
    from: Point<f64>,
    to: Point<f64>,
    rx: f64,
    ry: f64,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> Segment {
    let svg_arc = SvgArc {
        from,
        to,
        radii: vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(x_rotation),
        flags: ArcFlags { large_arc, sweep },
    };
    if svg_arc.is_straight_line() {
        Segment::Line(LineSegment { from, to })
    } else {
        Segment::Arc(Arc::from_svg_arc(&svg_arc))
    }
}

/// A full ellipse as two half arcs.
///
/// Starts at the rightmost point, runs to the leftmost and back.
pub fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> PathData {
    let right = point(cx + rx, cy);
    let left = point(cx - rx, cy);

    let mut subpath = SubPath::new(right);
    subpath.segments.push(arc_segment(right, left, rx, ry, 0.0, true, false));
    subpath.segments.push(arc_segment(left, right, rx, ry, 0.0, true, false));
    subpath.closed = true;

    PathData { subpaths: vec![subpath] }
}

/// Absolute-coordinate builder fed by parsed path segments
struct PathBuilder {
    subpaths: Vec<SubPath>,
    current: Point<f64>,
    /// Second control point of the previous cubic, for `S`
    last_cubic_ctrl: Option<Point<f64>>,
    /// Control point of the previous quadratic, for `T`
    last_quad_ctrl: Option<Point<f64>>,
}

impl PathBuilder {
    fn new() -> Self {
        Self {
            subpaths: Vec::new(),
            current: point(0.0, 0.0),
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
        }
    }

    fn resolve(&self, abs: bool, x: f64, y: f64) -> Point<f64> {
        if abs {
            point(x, y)
        } else {
            point(self.current.x + x, self.current.y + y)
        }
    }

    fn reflect(&self, ctrl: Option<Point<f64>>) -> Point<f64> {
        match ctrl {
            Some(c) => point(2.0 * self.current.x - c.x, 2.0 * self.current.y - c.y),
            None => self.current,
        }
    }

    fn move_to(&mut self, to: Point<f64>) {
        self.subpaths.push(SubPath::new(to));
        self.current = to;
    }

    /// Subpath that drawing commands append to. After a closepath a new
    /// subpath starts at the closing point.
    fn open_subpath(&mut self) -> &mut SubPath {
        let needs_new = match self.subpaths.last() {
            Some(last) => last.closed,
            None => true,
        };
        if needs_new {
            self.subpaths.push(SubPath::new(self.current));
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn push(&mut self, segment: Segment) {
        let to = segment.to();
        self.open_subpath().segments.push(segment);
        self.current = to;
    }

    fn close(&mut self) {
        let subpath = self.open_subpath();
        let (start, end) = (subpath.start, subpath.end());
        if start != end {
            subpath.segments.push(Segment::Line(LineSegment { from: end, to: start }));
        }
        subpath.closed = true;
        self.current = start;
    }

    fn apply(&mut self, segment: PathSegment) {
        let from = self.current;
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let to = self.resolve(abs, x, y);
                self.move_to(to);
            }
            PathSegment::LineTo { abs, x, y } => {
                let to = self.resolve(abs, x, y);
                self.push(Segment::Line(LineSegment { from, to }));
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let to = if abs { point(x, from.y) } else { point(from.x + x, from.y) };
                self.push(Segment::Line(LineSegment { from, to }));
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let to = if abs { point(from.x, y) } else { point(from.x, from.y + y) };
                self.push(Segment::Line(LineSegment { from, to }));
            }
            PathSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                let ctrl1 = self.resolve(abs, x1, y1);
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.push(Segment::Cubic(CubicBezierSegment { from, ctrl1, ctrl2, to }));
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = self.reflect(self.last_cubic_ctrl);
                let ctrl2 = self.resolve(abs, x2, y2);
                let to = self.resolve(abs, x, y);
                self.push(Segment::Cubic(CubicBezierSegment { from, ctrl1, ctrl2, to }));
                cubic_ctrl = Some(ctrl2);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = self.resolve(abs, x1, y1);
                let to = self.resolve(abs, x, y);
                self.push(Segment::Quadratic(QuadraticBezierSegment { from, ctrl, to }));
                quad_ctrl = Some(ctrl);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = self.reflect(self.last_quad_ctrl);
                let to = self.resolve(abs, x, y);
                self.push(Segment::Quadratic(QuadraticBezierSegment { from, ctrl, to }));
                quad_ctrl = Some(ctrl);
            }
            PathSegment::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                let to = self.resolve(abs, x, y);
                if to != from {
                    self.push(arc_segment(from, to, rx, ry, x_axis_rotation, large_arc, sweep));
                }
            }
            PathSegment::ClosePath { .. } => self.close(),
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
    }
}

/// Parse SVG path data into absolute segments.
///
/// Relative commands, implicit repeats and smooth-curve reflection are
/// resolved. Arcs with a zero radius become lines.
pub fn parse_path_data(d: &str) -> Result<PathData, PathError> {
    let mut builder = PathBuilder::new();
    for segment in PathParser::from(d) {
        builder.apply(segment?);
    }
    Ok(PathData { subpaths: builder.subpaths })
}

impl PathData {
    /// Sample every segment `steps` times.
    ///
    /// The point shared by two consecutive segments appears once. Subpaths
    /// without segments are dropped.
    pub fn sample(&self, steps: u32) -> Vec<Polyline> {
        let steps = steps.max(1);
        self.subpaths
            .iter()
            .filter(|s| !s.segments.is_empty())
            .map(|subpath| {
                let mut points = Vec::with_capacity(subpath.segments.len() * steps as usize + 1);
                for (i, segment) in subpath.segments.iter().enumerate() {
                    let first = if i == 0 { 0 } else { 1 };
                    for k in first..=steps {
                        let p = segment.sample(k as f64 / steps as f64);
                        points.push((p.x, p.y));
                    }
                }
                Polyline { points, closed: subpath.closed }
            })
            .collect()
    }
}

/// Format `value` with at most `precision` decimals, trimming trailing zeros.
///
/// # Examples
///
/// ```
/// use sprep::svg::format_number;
///
/// assert_eq!(format_number(1.50000, 4), "1.5");
/// assert_eq!(format_number(2.0, 4), "2");
/// assert_eq!(format_number(-0.00001, 4), "0");
/// ```
pub fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{:.*}", precision, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Write polylines as `M x,y L x,y ...` path data, one subpath each.
pub fn polylines_to_d(polylines: &[Polyline], precision: usize) -> String {
    let mut parts = Vec::new();
    for polyline in polylines {
        for (i, &(x, y)) in polyline.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            parts.push(format!(
                "{} {},{}",
                command,
                format_number(x, precision),
                format_number(y, precision)
            ));
        }
        if polyline.closed && !polyline.points.is_empty() {
            parts.push("Z".to_string());
        }
    }
    parts.join(" ")
}

/// Sample `path`, map it through `matrix` and write the result as path data.
pub fn flatten_path(path: &PathData, matrix: &Matrix, steps: u32, precision: usize) -> String {
    let mut polylines = path.sample(steps);
    for polyline in &mut polylines {
        polyline.transform(matrix);
    }
    polylines_to_d(&polylines, precision)
}
