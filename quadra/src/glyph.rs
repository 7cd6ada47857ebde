// Copyright 2026 the Quadra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Support for glyph outlines.
//!
//! Glyphs are drawn unscaled, in font units, through a skrifa [`OutlinePen`]
//! that records [`OutlineEvent`]s, which are then folded into a curve set with
//! [`decompose`].

use peniko::kurbo::{self, CubicBez};
use quadra_encoding::{decompose, Outline, OutlineEvent, Point};
use skrifa::charmap::Charmap;
use skrifa::instance::{LocationRef, NormalizedCoord, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::raw::FontRef;
use skrifa::setting::Setting;
use skrifa::{GlyphId, MetadataProvider, OutlineGlyphCollection};

use crate::{Error, Result};

/// What to do with cubic segments, which the coverage evaluator can't draw.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CubicPolicy {
    /// Fail with [`quadra_encoding::DecomposeError::UnsupportedCubic`].
    #[default]
    Reject,
    /// Replace each cubic with quadratics within `accuracy` font units.
    Approximate { accuracy: f64 },
}

/// General context for creating curve sets from glyph outlines.
#[derive(Default)]
pub struct GlyphContext {
    coords: Vec<NormalizedCoord>,
}

impl GlyphContext {
    /// Creates a new context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new provider for glyph outlines from the specified font at
    /// the given variation settings.
    pub fn new_provider<'a, V>(
        &'a mut self,
        font: &FontRef<'a>,
        variations: V,
    ) -> GlyphProvider<'a>
    where
        V: IntoIterator,
        V::Item: Into<Setting<f32>>,
    {
        let axes = font.axes();
        self.coords.clear();
        self.coords.resize(axes.len(), Default::default());
        axes.location_to_slice(variations, &mut self.coords);
        if self.coords.iter().all(|x| *x == NormalizedCoord::default()) {
            self.coords.clear();
        }
        GlyphProvider {
            outlines: font.outline_glyphs(),
            charmap: font.charmap(),
            units_per_em: font
                .metrics(Size::unscaled(), LocationRef::default())
                .units_per_em,
            coords: &self.coords,
            cubic_policy: CubicPolicy::default(),
        }
    }
}

/// Generator of curve sets for the glyphs of a specific font.
pub struct GlyphProvider<'a> {
    outlines: OutlineGlyphCollection<'a>,
    charmap: Charmap<'a>,
    units_per_em: u16,
    coords: &'a [NormalizedCoord],
    cubic_policy: CubicPolicy,
}

impl GlyphProvider<'_> {
    #[must_use]
    pub fn with_cubic_policy(mut self, cubic_policy: CubicPolicy) -> Self {
        self.cubic_policy = cubic_policy;
        self
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Maps a character to its glyph id.
    pub fn glyph_id(&self, ch: char) -> Result<GlyphId> {
        self.charmap.map(ch).ok_or(Error::MissingGlyph(ch))
    }

    /// Returns the outline of a glyph in font units.
    pub fn outline(&self, gid: GlyphId) -> Result<Outline> {
        let glyph = self
            .outlines
            .get(gid)
            .ok_or(Error::MissingOutline(gid.to_u32()))?;
        let mut pen = EventPen::new(self.cubic_policy);
        let settings = DrawSettings::unhinted(Size::unscaled(), self.coords);
        glyph
            .draw(settings, &mut pen)
            .map_err(|err| Error::OutlineDraw {
                gid: gid.to_u32(),
                message: format!("{err:?}"),
            })?;
        let outline = decompose(pen.events)?;
        log::debug!(
            "glyph {}: {} curves, bounds {:?} to {:?}",
            gid.to_u32(),
            outline.curves.len(),
            outline.bbox.min,
            outline.bbox.max
        );
        Ok(outline)
    }

    /// Returns the outline of the glyph mapped to `ch`.
    pub fn char_outline(&self, ch: char) -> Result<Outline> {
        self.outline(self.glyph_id(ch)?)
    }
}

/// Records the drawing commands of an outline.
struct EventPen {
    events: Vec<OutlineEvent>,
    current: Point,
    start: Point,
    cubic_policy: CubicPolicy,
}

impl EventPen {
    fn new(cubic_policy: CubicPolicy) -> Self {
        Self {
            events: Vec::new(),
            current: Point::ZERO,
            start: Point::ZERO,
            cubic_policy,
        }
    }
}

fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x as f64, p.y as f64)
}

fn from_kurbo(p: kurbo::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

impl OutlinePen for EventPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.current = Point::new(x, y);
        self.start = self.current;
        self.events.push(OutlineEvent::MoveTo(self.current));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current = Point::new(x, y);
        self.events.push(OutlineEvent::LineTo(self.current));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.current = Point::new(x, y);
        self.events
            .push(OutlineEvent::QuadTo(Point::new(cx0, cy0), self.current));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (c0, c1, to) = (Point::new(cx0, cy0), Point::new(cx1, cy1), Point::new(x, y));
        match self.cubic_policy {
            CubicPolicy::Reject => self.events.push(OutlineEvent::CubicTo(c0, c1, to)),
            CubicPolicy::Approximate { accuracy } => {
                let cubic = CubicBez::new(
                    to_kurbo(self.current),
                    to_kurbo(c0),
                    to_kurbo(c1),
                    to_kurbo(to),
                );
                for (_, _, quad) in cubic.to_quads(accuracy) {
                    self.events
                        .push(OutlineEvent::QuadTo(from_kurbo(quad.p1), from_kurbo(quad.p2)));
                }
                // Land exactly on the end point so closing stays exact.
                if let Some(OutlineEvent::QuadTo(_, end)) = self.events.last_mut() {
                    *end = to;
                }
            }
        }
        self.current = to;
    }

    fn close(&mut self) {
        self.events.push(OutlineEvent::Close);
        self.current = self.start;
    }
}
