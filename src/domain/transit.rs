// src/domain/transit.rs

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineColor {
    Green,
    Blue,
    Orange,
    Red,
    Commuter,
    Silver,
}

impl LineColor {
    pub fn css_class(self) -> &'static str {
        match self {
            LineColor::Green => "train-green",
            LineColor::Blue => "train-blue",
            LineColor::Orange => "train-orange",
            LineColor::Red => "train-red",
            LineColor::Commuter => "train-commuter",
            LineColor::Silver => "train-silver",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitLine {
    GreenMain,
    GreenB,
    GreenC,
    GreenD,
    GreenE,
    Blue,
    Orange,
    RedMain,
    RedBraintree,
    RedAshmont,
    RedMattapan,
    CommuterRail,
    Silver,
}

/// What a badge looks like: its color and an optional one-letter branch code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDescriptor {
    pub color: LineColor,
    pub code: Option<char>,
}

// Characterization name, variant, badge.
const LINE_TABLE: &[(&str, TransitLine, BadgeDescriptor)] = &[
    ("Green Line (main)", TransitLine::GreenMain, badge(LineColor::Green, None)),
    ("Green Line (B)", TransitLine::GreenB, badge(LineColor::Green, Some('B'))),
    ("Green Line (C)", TransitLine::GreenC, badge(LineColor::Green, Some('C'))),
    ("Green Line (D)", TransitLine::GreenD, badge(LineColor::Green, Some('D'))),
    ("Green Line (E)", TransitLine::GreenE, badge(LineColor::Green, Some('E'))),
    ("Blue Line", TransitLine::Blue, badge(LineColor::Blue, None)),
    ("Orange Line", TransitLine::Orange, badge(LineColor::Orange, None)),
    ("Red Line (main)", TransitLine::RedMain, badge(LineColor::Red, None)),
    ("Red Line (Braintree)", TransitLine::RedBraintree, badge(LineColor::Red, Some('B'))),
    ("Red Line (Ashmont)", TransitLine::RedAshmont, badge(LineColor::Red, Some('A'))),
    ("Red Line (Mattapan)", TransitLine::RedMattapan, badge(LineColor::Red, Some('M'))),
    ("Commuter Rail", TransitLine::CommuterRail, badge(LineColor::Commuter, None)),
    ("Silver Line", TransitLine::Silver, badge(LineColor::Silver, None)),
];

const fn badge(color: LineColor, code: Option<char>) -> BadgeDescriptor {
    BadgeDescriptor { color, code }
}

impl TransitLine {
    pub const ALL: [TransitLine; 13] = [
        TransitLine::GreenMain,
        TransitLine::GreenB,
        TransitLine::GreenC,
        TransitLine::GreenD,
        TransitLine::GreenE,
        TransitLine::Blue,
        TransitLine::Orange,
        TransitLine::RedMain,
        TransitLine::RedBraintree,
        TransitLine::RedAshmont,
        TransitLine::RedMattapan,
        TransitLine::CommuterRail,
        TransitLine::Silver,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        LINE_TABLE
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, line, _)| *line)
    }

    fn entry(self) -> Option<&'static (&'static str, TransitLine, BadgeDescriptor)> {
        LINE_TABLE.iter().find(|(_, line, _)| *line == self)
    }

    pub fn name(self) -> &'static str {
        self.entry().map(|(n, _, _)| *n).unwrap_or("unknown")
    }

    pub fn descriptor(self) -> BadgeDescriptor {
        self.entry()
            .map(|(_, _, d)| *d)
            .unwrap_or(badge(LineColor::Commuter, None))
    }
}

/// A transit entry resolved against the line table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitBadge {
    Known(TransitLine),
    Unknown(String),
}

impl TransitBadge {
    pub fn resolve(name: &str) -> Self {
        match TransitLine::from_name(name) {
            Some(line) => TransitBadge::Known(line),
            None => TransitBadge::Unknown(name.to_string()),
        }
    }
}

/// Every variant must appear exactly once in the table, and every name must be unique.
/// Run at startup.
pub fn validate_line_table() -> Result<(), String> {
    let mut names = HashSet::new();
    let mut lines = HashSet::new();

    for (name, line, _) in LINE_TABLE {
        if !names.insert(*name) {
            return Err(format!("duplicate transit line name '{name}'"));
        }
        if !lines.insert(*line) {
            return Err(format!("transit line {line:?} listed twice"));
        }
    }

    for line in TransitLine::ALL {
        if !lines.contains(&line) {
            return Err(format!("transit line {line:?} has no badge"));
        }
    }

    Ok(())
}
