// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reduction of outline drawing events into a quadratic [`CurveSet`].

use thiserror::Error;

use crate::{Bbox, Curve, CurveSet, Point};

/// A single drawing command of an outline, as produced by a font scaler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OutlineEvent {
    MoveTo(Point),
    LineTo(Point),
    /// Control point, end point.
    QuadTo(Point, Point),
    /// First control point, second control point, end point.
    CubicTo(Point, Point, Point),
    Close,
}

/// Errors raised while reducing an outline to quadratic curves.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecomposeError {
    /// The coverage evaluator has no cubic support; cubic segments must be
    /// converted to quadratics before they reach the reduction.
    #[error("cubic segment {segment} of contour {contour} is not supported")]
    UnsupportedCubic { contour: usize, segment: usize },
}

/// The result of decomposing an outline.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    pub curves: CurveSet,
    /// Bounds of the start points, end points and control points seen.
    pub bbox: Bbox,
}

/// Accumulator for the outline reduction.
///
/// Each event is applied with [`OutlineBuilder::apply`], which consumes the
/// builder and returns the updated state, so a whole outline is a
/// [`Iterator::try_fold`] over its events (see [`decompose`]).
#[derive(Clone, Debug, Default)]
pub struct OutlineBuilder {
    current: Point,
    start: Point,
    bbox: Bbox,
    curves: Vec<Curve>,
    contour: usize,
    segment: usize,
    started: bool,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one outline event.
    ///
    /// Line segments become curves with a midpoint control point and
    /// quadratic segments are kept as they are. A [`OutlineEvent::Close`]
    /// adds the closing line when the contour doesn't already end at its
    /// start point. Cubic segments are rejected.
    pub fn apply(mut self, event: OutlineEvent) -> Result<Self, DecomposeError> {
        match event {
            OutlineEvent::MoveTo(to) => {
                if self.started {
                    self.contour += 1;
                }
                self.started = true;
                self.segment = 0;
                self.current = to;
                self.start = to;
                self.bbox.add_point(to);
            }
            OutlineEvent::LineTo(to) => {
                self.push(Curve::line(self.current, to));
                self.current = to;
                self.bbox.add_point(to);
            }
            OutlineEvent::QuadTo(control, to) => {
                self.push(Curve::new(self.current, control, to));
                self.current = to;
                self.bbox.add_point(control);
                self.bbox.add_point(to);
            }
            OutlineEvent::CubicTo(..) => {
                return Err(DecomposeError::UnsupportedCubic {
                    contour: self.contour,
                    segment: self.segment,
                });
            }
            OutlineEvent::Close => {
                if self.current != self.start {
                    self.push(Curve::line(self.current, self.start));
                    self.current = self.start;
                }
            }
        }
        Ok(self)
    }

    fn push(&mut self, curve: Curve) {
        self.curves.push(curve);
        self.segment += 1;
    }

    /// Number of curves emitted so far.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn finish(self) -> Outline {
        Outline {
            curves: CurveSet::new(self.curves),
            bbox: self.bbox,
        }
    }
}

/// Reduces a sequence of outline events to a curve set and its bounds.
pub fn decompose(
    events: impl IntoIterator<Item = OutlineEvent>,
) -> Result<Outline, DecomposeError> {
    events
        .into_iter()
        .try_fold(OutlineBuilder::new(), OutlineBuilder::apply)
        .map(OutlineBuilder::finish)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn lines_become_midpoint_curves() {
        let outline = decompose([
            OutlineEvent::MoveTo(p(0.0, 0.0)),
            OutlineEvent::LineTo(p(10.0, 0.0)),
            OutlineEvent::LineTo(p(10.0, 10.0)),
        ])
        .unwrap();
        assert_eq!(
            outline.curves.as_slice(),
            &[
                Curve::new((0.0, 0.0), (5.0, 0.0), (10.0, 0.0)),
                Curve::new((10.0, 0.0), (10.0, 5.0), (10.0, 10.0)),
            ]
        );
        assert_eq!(outline.bbox, Bbox::new((0.0, 0.0), (10.0, 10.0)));
    }

    #[test]
    fn quadratics_pass_through_and_extend_bbox() {
        let outline = decompose([
            OutlineEvent::MoveTo(p(0.0, 0.0)),
            OutlineEvent::QuadTo(p(5.0, 20.0), p(10.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(
            outline.curves.as_slice(),
            &[Curve::new((0.0, 0.0), (5.0, 20.0), (10.0, 0.0))]
        );
        assert_eq!(outline.bbox.max, p(10.0, 20.0));
    }

    #[test]
    fn close_adds_missing_edge() {
        let outline = decompose([
            OutlineEvent::MoveTo(p(0.0, 0.0)),
            OutlineEvent::LineTo(p(4.0, 0.0)),
            OutlineEvent::LineTo(p(4.0, 4.0)),
            OutlineEvent::Close,
        ])
        .unwrap();
        assert_eq!(outline.curves.len(), 3);
        assert_eq!(outline.curves[2], Curve::line((4.0, 4.0), (0.0, 0.0)));
    }

    #[test]
    fn close_on_start_point_adds_nothing() {
        let outline = decompose([
            OutlineEvent::MoveTo(p(0.0, 0.0)),
            OutlineEvent::LineTo(p(4.0, 0.0)),
            OutlineEvent::LineTo(p(0.0, 0.0)),
            OutlineEvent::Close,
        ])
        .unwrap();
        assert_eq!(outline.curves.len(), 2);
    }

    #[test]
    fn cubic_is_rejected_with_location() {
        let err = decompose([
            OutlineEvent::MoveTo(p(0.0, 0.0)),
            OutlineEvent::LineTo(p(1.0, 0.0)),
            OutlineEvent::Close,
            OutlineEvent::MoveTo(p(5.0, 5.0)),
            OutlineEvent::LineTo(p(6.0, 5.0)),
            OutlineEvent::CubicTo(p(7.0, 6.0), p(8.0, 6.0), p(9.0, 5.0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DecomposeError::UnsupportedCubic {
                contour: 1,
                segment: 1
            }
        );
    }

    #[test]
    fn fold_steps_match_decompose() {
        let events = [
            OutlineEvent::MoveTo(p(1.0, 1.0)),
            OutlineEvent::QuadTo(p(2.0, 3.0), p(3.0, 1.0)),
            OutlineEvent::Close,
        ];
        let mut builder = OutlineBuilder::new();
        for event in events {
            builder = builder.apply(event).unwrap();
        }
        assert_eq!(builder.len(), 2);
        let outline = builder.finish();
        assert_eq!(outline.curves, decompose(events).unwrap().curves);
    }

    #[test]
    fn no_events_is_empty() {
        let outline = decompose(Vec::<OutlineEvent>::new()).unwrap();
        assert!(outline.curves.is_empty());
        assert!(outline.bbox.is_empty());
    }
}
