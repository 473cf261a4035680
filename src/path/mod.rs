//! # Path Parser
//!
//! Turns the `d` attribute of an SVG `<path>` into a list of absolute points.
//! Supports the straight-line subset of the path language: M, L, H, V, Z
//! (absolute + relative). Tokens are whitespace separated; a coordinate pair
//! may also be written as one comma-joined token (`10,20`).
//!
//! The parser is a small state machine. Command letters switch the active
//! mode; bare numbers are interpreted by whatever mode is active. `M` and `L`
//! are the exception: they read their own coordinate pair straight away.

use std::str::SplitWhitespace;

use thiserror::Error;
use tracing::trace;

/// Two points closer than this on both axes count as the same point when
/// deciding whether a ring still needs closing.
pub const CLOSE_EPSILON: f64 = 0.001;

/// A point in source (pixel / viewBox) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Whether both coordinates are within [`CLOSE_EPSILON`] of `other`.
    pub fn close_to(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < CLOSE_EPSILON && (self.y - other.y).abs() < CLOSE_EPSILON
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// The drawing operation named by a command letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Move,
    Line,
    Horizontal,
    Vertical,
    Close,
}

/// A command letter: the operation plus whether its operands are relative
/// to the current point (lowercase) or absolute (uppercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
}

impl PathCommand {
    /// Recognize a single command token. Anything else is not a command.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let kind = match letter.to_ascii_lowercase() {
            'm' => CommandKind::Move,
            'l' => CommandKind::Line,
            'h' => CommandKind::Horizontal,
            'v' => CommandKind::Vertical,
            'z' => CommandKind::Close,
            _ => return None,
        };
        Some(PathCommand {
            kind,
            relative: letter.is_ascii_lowercase(),
        })
    }

    fn letter(&self) -> char {
        let upper = match self.kind {
            CommandKind::Move => 'M',
            CommandKind::Line => 'L',
            CommandKind::Horizontal => 'H',
            CommandKind::Vertical => 'V',
            CommandKind::Close => 'Z',
        };
        if self.relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }
}

/// Everything that can go wrong while reading path data. Each variant
/// carries the zero-based index of the token it refers to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("invalid number {token:?} at token {index}")]
    InvalidNumber { index: usize, token: String },

    #[error("missing {expected} coordinate after token {index}")]
    MissingOperand { index: usize, expected: &'static str },

    #[error("unsupported command {token:?} at token {index}")]
    UnknownCommand { index: usize, token: String },

    #[error("number {token:?} at token {index} does not follow any command")]
    StrayOperand { index: usize, token: String },

    #[error("'{command}' at token {index} has no current point to continue from")]
    NoCurrentPoint { index: usize, command: char },

    #[error("cannot close a path of {points} point(s) at token {index}")]
    CloseTooShort { index: usize, points: usize },

    #[error("path contains no points")]
    Empty,
}

/// The mode bare numbers are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    MoveTo,
    HLine,
    VLine,
    LineTo,
    ClosePath,
}

/// Whitespace-delimited tokens, numbered from zero.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    index: usize,
}

impl<'a> Tokens<'a> {
    fn new(d: &'a str) -> Self {
        Tokens {
            inner: d.split_whitespace(),
            index: 0,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Some((index, token))
    }
}

/// Cursor, active mode and points emitted so far for one path.
#[derive(Debug)]
struct Tracer {
    state: State,
    relative: bool,
    cursor: Point,
    points: Vec<Point>,
}

impl Tracer {
    fn new() -> Self {
        Tracer {
            state: State::None,
            relative: false,
            cursor: Point::default(),
            points: Vec::new(),
        }
    }

    /// Resolve operands against the cursor and record the resulting point.
    /// A missing operand keeps that axis where the cursor is.
    fn emit(&mut self, dx: Option<f64>, dy: Option<f64>) {
        let resolve = |operand: Option<f64>, current: f64| match operand {
            Some(v) if self.relative => current + v,
            Some(v) => v,
            None => current,
        };
        let point = Point::new(resolve(dx, self.cursor.x), resolve(dy, self.cursor.y));
        self.points.push(point);
        self.cursor = point;
    }

    fn require_point(&self, index: usize, command: PathCommand) -> Result<(), PathError> {
        if self.points.is_empty() {
            return Err(PathError::NoCurrentPoint {
                index,
                command: command.letter(),
            });
        }
        Ok(())
    }

    fn command(
        &mut self,
        index: usize,
        command: PathCommand,
        tokens: &mut Tokens<'_>,
    ) -> Result<(), PathError> {
        self.relative = command.relative;
        match command.kind {
            CommandKind::Move if command.relative => {
                self.state = State::MoveTo;
            }
            CommandKind::Move => {
                let (x, y) = read_pair(index, tokens)?;
                self.emit(Some(x), Some(y));
                self.state = State::LineTo;
            }
            CommandKind::Line => {
                self.require_point(index, command)?;
                if !command.relative {
                    let (x, y) = read_pair(index, tokens)?;
                    self.emit(Some(x), Some(y));
                }
                self.state = State::LineTo;
            }
            CommandKind::Horizontal => {
                self.require_point(index, command)?;
                self.state = State::HLine;
            }
            CommandKind::Vertical => {
                self.require_point(index, command)?;
                self.state = State::VLine;
            }
            CommandKind::Close => {
                self.close(index)?;
                self.state = State::ClosePath;
            }
        }
        Ok(())
    }

    fn operand(
        &mut self,
        index: usize,
        token: &str,
        tokens: &mut Tokens<'_>,
    ) -> Result<(), PathError> {
        match self.state {
            // parse() stops reading once the state is ClosePath.
            State::None | State::ClosePath => {
                return Err(PathError::StrayOperand {
                    index,
                    token: token.to_string(),
                })
            }
            State::MoveTo | State::LineTo => {
                let (x, y) = pair_from(index, token, tokens)?;
                self.emit(Some(x), Some(y));
            }
            State::HLine => {
                let x = number(index, token)?;
                self.emit(Some(x), None);
            }
            State::VLine => {
                let y = number(index, token)?;
                self.emit(None, Some(y));
            }
        }
        self.state = State::LineTo;
        Ok(())
    }

    /// Append the first point if the ring is still open.
    fn close(&mut self, index: usize) -> Result<(), PathError> {
        let (first, last) = match self.points.as_slice() {
            [first, .., last] => (*first, *last),
            _ => {
                return Err(PathError::CloseTooShort {
                    index,
                    points: self.points.len(),
                })
            }
        };
        if !first.close_to(&last) {
            self.points.push(first);
            self.cursor = first;
        }
        Ok(())
    }
}

/// Parse path data into absolute points.
///
/// Parsing stops at the first `z`/`Z`; anything after it is ignored. The
/// returned list is never empty.
pub fn parse(d: &str) -> Result<Vec<Point>, PathError> {
    let mut tokens = Tokens::new(d);
    let mut tracer = Tracer::new();

    while let Some((index, token)) = tokens.next() {
        match PathCommand::from_token(token) {
            Some(command) => tracer.command(index, command, &mut tokens)?,
            None if starts_like_number(token) => tracer.operand(index, token, &mut tokens)?,
            None => {
                return Err(PathError::UnknownCommand {
                    index,
                    token: token.to_string(),
                })
            }
        }
        if tracer.state == State::ClosePath {
            let skipped = tokens.by_ref().count();
            if skipped > 0 {
                trace!(skipped, "ignoring tokens after close path");
            }
            break;
        }
    }

    if tracer.points.is_empty() {
        return Err(PathError::Empty);
    }
    Ok(tracer.points)
}

/// Read the coordinate pair that follows the command at `index`.
fn read_pair(index: usize, tokens: &mut Tokens<'_>) -> Result<(f64, f64), PathError> {
    let (next, token) = tokens.next().ok_or(PathError::MissingOperand {
        index,
        expected: "x",
    })?;
    pair_from(next, token, tokens)
}

/// A pair is either `x,y` in one token, `x,` followed by `y`, or `x` followed
/// by `y`.
fn pair_from(index: usize, token: &str, tokens: &mut Tokens<'_>) -> Result<(f64, f64), PathError> {
    match token.split_once(',') {
        Some((x, y)) if !y.is_empty() => Ok((number(index, x)?, number(index, y)?)),
        Some((x, _)) => {
            let x = number(index, x)?;
            Ok((x, next_number(index, "y", tokens)?))
        }
        None => {
            let x = number(index, token)?;
            Ok((x, next_number(index, "y", tokens)?))
        }
    }
}

fn next_number(
    after: usize,
    expected: &'static str,
    tokens: &mut Tokens<'_>,
) -> Result<f64, PathError> {
    let (index, token) = tokens.next().ok_or(PathError::MissingOperand {
        index: after,
        expected,
    })?;
    number(index, token)
}

fn number(index: usize, token: &str) -> Result<f64, PathError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PathError::InvalidNumber {
            index,
            token: token.to_string(),
        }),
    }
}

/// Numbers start with a digit, a sign or a decimal point. Used to tell a
/// misspelled command apart from a malformed number.
fn starts_like_number(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(d: &str) -> Vec<(f64, f64)> {
        parse(d)
            .expect("path should parse")
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    fn assert_points(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.0 - e.0).abs() < 1e-9 && (a.1 - e.1).abs() < 1e-9,
                "{:?} vs {:?}",
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_absolute_square_gets_closed() {
        let pts = points("M 0,0 L 10,0 L 10,10 Z");
        assert_points(&pts, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_relative_shorthand() {
        let pts = points("M 5,5 h 10 v 10 h -10 z");
        assert_points(
            &pts,
            &[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)],
        );
    }

    #[test]
    fn test_already_closed_ring_is_not_extended() {
        let pts = points("M 0 0 L 10 0 L 10 10 L 0.0004 -0.0002 Z");
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_space_separated_pairs() {
        let pts = points("M 1 2 L 3 4");
        assert_points(&pts, &[(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_comma_then_space() {
        let pts = points("M 1, 2 L 3,4");
        assert_points(&pts, &[(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_relative_move_adds_to_cursor() {
        let pts = points("m 10,20 5,5 -3,1");
        assert_points(&pts, &[(10.0, 20.0), (15.0, 25.0), (12.0, 26.0)]);
    }

    #[test]
    fn test_relative_move_after_points() {
        let pts = points("M 100 100 m 1,2");
        assert_points(&pts, &[(100.0, 100.0), (101.0, 102.0)]);
    }

    #[test]
    fn test_relative_line_continuation() {
        let pts = points("M 1,1 l 1,1 1,1 2,0");
        assert_points(&pts, &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (5.0, 3.0)]);
    }

    #[test]
    fn test_absolute_line_continuation() {
        let pts = points("M 0,0 L 1 1 2,2");
        assert_points(&pts, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn test_absolute_hv_carry_other_axis() {
        let pts = points("M 3,4 H 10 V 20");
        assert_points(&pts, &[(3.0, 4.0), (10.0, 4.0), (10.0, 20.0)]);
    }

    #[test]
    fn test_repeated_h_operands_continue_as_line() {
        // After the first H operand the mode is LineTo, so the next token
        // must be a pair.
        let pts = points("M 0,0 H 5 6,7");
        assert_points(&pts, &[(0.0, 0.0), (5.0, 0.0), (6.0, 7.0)]);
    }

    #[test]
    fn test_tokens_after_close_are_ignored() {
        let pts = points("M 0,0 L 1,0 L 1,1 z M 50,50 garbage");
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_missing_y_for_line() {
        let err = parse("M 1,2 L 3").unwrap_err();
        assert!(matches!(
            err,
            PathError::MissingOperand { index: 3, expected: "y" }
        ));
    }

    #[test]
    fn test_missing_pair_for_move() {
        assert!(matches!(
            parse("M").unwrap_err(),
            PathError::MissingOperand { index: 0, expected: "x" }
        ));
    }

    #[test]
    fn test_invalid_number_names_token() {
        let err = parse("M 1,abc").unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidNumber {
                index: 1,
                token: "abc".to_string()
            }
        );
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_line_before_any_point() {
        assert!(matches!(
            parse("l 1,1").unwrap_err(),
            PathError::NoCurrentPoint { command: 'l', .. }
        ));
        assert!(matches!(
            parse("h 10").unwrap_err(),
            PathError::NoCurrentPoint { command: 'h', .. }
        ));
        assert!(matches!(
            parse("V 10").unwrap_err(),
            PathError::NoCurrentPoint { command: 'V', .. }
        ));
    }

    #[test]
    fn test_close_with_too_few_points() {
        assert_eq!(
            parse("z").unwrap_err(),
            PathError::CloseTooShort { index: 0, points: 0 }
        );
        assert_eq!(
            parse("M 1,1 Z").unwrap_err(),
            PathError::CloseTooShort { index: 2, points: 1 }
        );
    }

    #[test]
    fn test_number_without_command() {
        assert!(matches!(
            parse("1,2").unwrap_err(),
            PathError::StrayOperand { index: 0, .. }
        ));
    }

    #[test]
    fn test_unsupported_command() {
        assert!(matches!(
            parse("M 0,0 C 1,1 2,2 3,3").unwrap_err(),
            PathError::UnknownCommand { index: 2, .. }
        ));
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(parse("").unwrap_err(), PathError::Empty);
        assert_eq!(parse("   ").unwrap_err(), PathError::Empty);
        assert_eq!(parse("m").unwrap_err(), PathError::Empty);
    }

    #[test]
    fn test_non_finite_number_rejected() {
        assert!(matches!(
            parse("M inf,0").unwrap_err(),
            PathError::InvalidNumber { index: 1, .. }
        ));
        assert!(matches!(
            parse("M 1e400,0").unwrap_err(),
            PathError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_relative_offsets_sum_exactly() {
        let steps = [(0.1, 0.2), (-3.5, 7.25), (1e3, -1e-3), (42.0, 0.0)];
        let d = std::iter::once("M 7,11 l".to_string())
            .chain(steps.iter().map(|(x, y)| format!("{},{}", x, y)))
            .collect::<Vec<_>>()
            .join(" ");
        let pts = parse(&d).unwrap();
        for (window, step) in pts.windows(2).zip(steps.iter()) {
            assert!((window[1].x - (window[0].x + step.0)).abs() < 1e-9);
            assert!((window[1].y - (window[0].y + step.1)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_command_from_token() {
        let cmd = PathCommand::from_token("h").unwrap();
        assert_eq!(cmd.kind, CommandKind::Horizontal);
        assert!(cmd.relative);
        let cmd = PathCommand::from_token("Z").unwrap();
        assert_eq!(cmd.kind, CommandKind::Close);
        assert!(!cmd.relative);
        assert!(PathCommand::from_token("MM").is_none());
        assert!(PathCommand::from_token("C").is_none());
    }
}
