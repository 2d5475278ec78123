use std::io;
use std::io::prelude::*;

use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

mod base {
    use core::ops::Range;
    use std::str::FromStr;

    use nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{char, digit1, space1},
        combinator::{map, map_res, value},
        sequence::{delimited, preceded, separated_pair, terminated, tuple},
        IResult,
    };

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Point {
        pub x: u32,
        pub y: u32,
    }

    impl Point {
        pub fn new(x: u32, y: u32) -> Point {
            Point { x, y }
        }
    }

    /// An axis-aligned rectangle including both of its corners.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Rectangle {
        pub top_left: Point,
        pub bot_right: Point,
    }

    impl Rectangle {
        pub fn new(top_left: Point, bot_right: Point) -> Result<Rectangle, String> {
            if top_left.x <= bot_right.x && top_left.y <= bot_right.y {
                Ok(Rectangle {
                    top_left,
                    bot_right,
                })
            } else {
                Err(format!(
                    "inverted rectangle {},{} through {},{}",
                    top_left.x, top_left.y, bot_right.x, bot_right.y
                ))
            }
        }

        /// Half-open span of x coordinates.  Widened to u64 because the
        /// end can be one past u32::MAX.
        pub fn xs(&self) -> Range<u64> {
            u64::from(self.top_left.x)..(u64::from(self.bot_right.x) + 1)
        }

        pub fn ys(&self) -> Range<u64> {
            u64::from(self.top_left.y)..(u64::from(self.bot_right.y) + 1)
        }

        pub fn area(&self) -> u128 {
            let xs = self.xs();
            let ys = self.ys();
            u128::from(xs.end - xs.start) * u128::from(ys.end - ys.start)
        }

        #[cfg(test)]
        pub fn contains(&self, p: &Point) -> bool {
            (self.top_left.x..=self.bot_right.x).contains(&p.x)
                && (self.top_left.y..=self.bot_right.y).contains(&p.y)
        }

        #[cfg(test)]
        pub fn points(&self) -> impl Iterator<Item = Point> {
            let ys = self.top_left.y..=self.bot_right.y;
            (self.top_left.x..=self.bot_right.x)
                .flat_map(move |x| ys.clone().map(move |y| Point::new(x, y)))
        }
    }

    #[test]
    fn test_rectangle_single_point() {
        let r = Rectangle::new(Point::new(3, 4), Point::new(3, 4)).unwrap();
        assert_eq!(r.area(), 1);
        assert_eq!(r.points().collect::<Vec<_>>(), vec![Point::new(3, 4)]);
        assert!(r.contains(&Point::new(3, 4)));
        assert!(!r.contains(&Point::new(4, 4)));
        assert!(!r.contains(&Point::new(3, 3)));
    }

    #[test]
    fn test_rectangle_points() {
        let r = Rectangle::new(Point::new(1, 1), Point::new(2, 3)).unwrap();
        assert_eq!(r.area(), 6);
        assert_eq!(r.xs(), 1..3);
        assert_eq!(r.ys(), 1..4);
        let points: Vec<Point> = r.points().collect();
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| r.contains(p)));
        assert_eq!(points[0], Point::new(1, 1));
        assert_eq!(points[5], Point::new(2, 3));
    }

    #[test]
    fn test_rectangle_extremes() {
        let r = Rectangle::new(Point::new(0, 0), Point::new(u32::MAX, u32::MAX)).unwrap();
        assert_eq!(r.xs(), 0..(1u64 << 32));
        assert_eq!(r.area(), 1u128 << 64);
        assert!(r.contains(&Point::new(u32::MAX, 0)));
    }

    #[test]
    fn test_rectangle_inverted() {
        assert!(Rectangle::new(Point::new(5, 0), Point::new(4, 9)).is_err());
        assert!(Rectangle::new(Point::new(0, 5), Point::new(9, 4)).is_err());
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub enum Action {
        TurnOn,
        TurnOff,
        Toggle,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Instruction {
        pub action: Action,
        pub area: Rectangle,
    }

    fn u32_parser(input: &str) -> IResult<&str, u32> {
        map_res(digit1, FromStr::from_str)(input)
    }

    fn parse_point(input: &str) -> IResult<&str, Point> {
        map(separated_pair(u32_parser, char(','), u32_parser), |(x, y)| {
            Point::new(x, y)
        })(input)
    }

    fn parse_action(input: &str) -> IResult<&str, Action> {
        alt((
            value(Action::TurnOn, tag("turn on")),
            value(Action::TurnOff, tag("turn off")),
            value(Action::Toggle, tag("toggle")),
        ))(input)
    }

    pub fn parse_instruction(input: &str) -> IResult<&str, (Action, Point, Point)> {
        tuple((
            terminated(parse_action, space1),
            parse_point,
            preceded(delimited(space1, tag("through"), space1), parse_point),
        ))(input)
    }

    #[test]
    fn test_parse_instruction() {
        assert_eq!(
            parse_instruction("turn on 0,0 through 999,999"),
            Ok((
                "",
                (Action::TurnOn, Point::new(0, 0), Point::new(999, 999))
            ))
        );
        assert_eq!(
            parse_instruction("toggle 0,0 through 999,0"),
            Ok(("", (Action::Toggle, Point::new(0, 0), Point::new(999, 0))))
        );
        assert_eq!(
            parse_instruction("turn off 499,499 through 500,500"),
            Ok((
                "",
                (Action::TurnOff, Point::new(499, 499), Point::new(500, 500))
            ))
        );
    }

    impl TryFrom<&str> for Instruction {
        type Error = String;
        fn try_from(s: &str) -> Result<Instruction, String> {
            match parse_instruction(s) {
                Ok(("", (action, top_left, bot_right))) => Ok(Instruction {
                    action,
                    area: Rectangle::new(top_left, bot_right)?,
                }),
                Ok((tail, _)) => Err(format!("unexpected trailing junk: '{}'", tail)),
                Err(e) => Err(format!("failed to parse '{}': {}", s, e)),
            }
        }
    }

    #[test]
    fn test_instruction_try_from() {
        assert_eq!(
            Instruction::try_from("turn off 1,2 through 3,4"),
            Ok(Instruction {
                action: Action::TurnOff,
                area: Rectangle {
                    top_left: Point::new(1, 2),
                    bot_right: Point::new(3, 4),
                }
            })
        );
        assert_eq!(
            Instruction::try_from("toggle 7,7 through 7,7").map(|i| i.action),
            Ok(Action::Toggle)
        );
    }

    #[test]
    fn test_instruction_malformed() {
        // unknown action
        assert!(Instruction::try_from("turn up 0,0 through 1,1").is_err());
        assert!(Instruction::try_from("flip 0,0 through 1,1").is_err());
        // missing "through"
        assert!(Instruction::try_from("turn on 0,0 1,1").is_err());
        assert!(Instruction::try_from("turn on 0,0 to 1,1").is_err());
        // bad coordinates
        assert!(Instruction::try_from("turn on 0,x through 1,1").is_err());
        assert!(Instruction::try_from("turn on -1,0 through 1,1").is_err());
        assert!(Instruction::try_from("turn on 0 through 1,1").is_err());
        assert!(Instruction::try_from("turn on 0,0 through 4294967296,1").is_err());
        // inverted
        assert!(Instruction::try_from("toggle 5,5 through 4,6").is_err());
        // trailing junk
        assert!(Instruction::try_from("toggle 0,0 through 1,1 please").is_err());
        assert!(Instruction::try_from("").is_err());
    }

    /// The sorted distinct boundaries of every rectangle along one axis.
    /// Consecutive boundaries delimit a cell; no rectangle edge falls
    /// inside a cell, so every point of a cell always shares its state.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Axis {
        bounds: Vec<u64>,
    }

    impl Axis {
        pub fn new<I: Iterator<Item = Range<u64>>>(spans: I) -> Axis {
            let mut bounds: Vec<u64> = spans.flat_map(|r| [r.start, r.end]).collect();
            bounds.sort_unstable();
            bounds.dedup();
            Axis { bounds }
        }

        pub fn cells(&self) -> usize {
            self.bounds.len().saturating_sub(1)
        }

        pub fn width(&self, cell: usize) -> u64 {
            self.bounds[cell + 1] - self.bounds[cell]
        }

        fn index_of(&self, boundary: u64) -> usize {
            self.bounds.partition_point(|b| *b < boundary)
        }

        pub fn cell_span(&self, span: &Range<u64>) -> Range<usize> {
            self.index_of(span.start)..self.index_of(span.end)
        }

        /// The cell holding coordinate `c`, if any rectangle covers that column.
        #[cfg(test)]
        pub fn cell_of(&self, c: u64) -> Option<usize> {
            let upper = self.bounds.partition_point(|b| *b <= c);
            if upper == 0 || upper >= self.bounds.len() {
                None
            } else {
                Some(upper - 1)
            }
        }
    }

    #[test]
    fn test_axis() {
        let axis = Axis::new([0..10, 5..6, 5..10].into_iter());
        assert_eq!(axis.bounds, vec![0, 5, 6, 10]);
        assert_eq!(axis.cells(), 3);
        assert_eq!(axis.width(0), 5);
        assert_eq!(axis.width(1), 1);
        assert_eq!(axis.width(2), 4);
        assert_eq!(axis.cell_span(&(0..10)), 0..3);
        assert_eq!(axis.cell_span(&(5..6)), 1..2);
        assert_eq!(axis.cell_of(0), Some(0));
        assert_eq!(axis.cell_of(5), Some(1));
        assert_eq!(axis.cell_of(9), Some(2));
        assert_eq!(axis.cell_of(10), None);
    }

    #[test]
    fn test_axis_empty() {
        let axis = Axis::new(std::iter::empty());
        assert_eq!(axis.cells(), 0);
        assert_eq!(axis.cell_of(0), None);
    }

    /// Coordinate-compressed view of the plane shared by both kinds of grid.
    #[derive(Debug)]
    pub struct Layout {
        pub x: Axis,
        pub y: Axis,
    }

    impl Layout {
        pub fn new(instructions: &[Instruction]) -> Layout {
            Layout {
                x: Axis::new(instructions.iter().map(|i| i.area.xs())),
                y: Axis::new(instructions.iter().map(|i| i.area.ys())),
            }
        }

        pub fn shape(&self) -> (usize, usize) {
            (self.x.cells(), self.y.cells())
        }

        pub fn cell_area(&self, cell: (usize, usize)) -> u128 {
            u128::from(self.x.width(cell.0)) * u128::from(self.y.width(cell.1))
        }

        pub fn cells_of(&self, r: &Rectangle) -> (Range<usize>, Range<usize>) {
            (self.x.cell_span(&r.xs()), self.y.cell_span(&r.ys()))
        }

        #[cfg(test)]
        pub fn cell_of(&self, p: &Point) -> Option<(usize, usize)> {
            Some((
                self.x.cell_of(u64::from(p.x))?,
                self.y.cell_of(u64::from(p.y))?,
            ))
        }
    }

    pub trait LightGrid {
        fn obey(&mut self, instruction: &Instruction);
        fn total(&self) -> u128;
    }
}

mod part1 {
    use ndarray::prelude::*;

    use super::base::*;

    pub struct Lights<'a> {
        layout: &'a Layout,
        lit: Array2<bool>,
    }

    impl<'a> Lights<'a> {
        pub fn new(layout: &'a Layout) -> Lights<'a> {
            Lights {
                layout,
                lit: Array2::from_elem(layout.shape(), false),
            }
        }

        #[cfg(test)]
        pub fn is_on(&self, p: &Point) -> bool {
            match self.layout.cell_of(p) {
                Some(cell) => self.lit[cell],
                None => false,
            }
        }
    }

    impl LightGrid for Lights<'_> {
        fn obey(&mut self, instruction: &Instruction) {
            let (xs, ys) = self.layout.cells_of(&instruction.area);
            let mut cells = self.lit.slice_mut(s![xs, ys]);
            match instruction.action {
                Action::TurnOn => cells.map_inplace(|on| *on = true),
                Action::TurnOff => cells.map_inplace(|on| *on = false),
                Action::Toggle => cells.map_inplace(|on| *on = !*on),
            }
        }

        fn total(&self) -> u128 {
            self.lit
                .indexed_iter()
                .filter(|(_, on)| **on)
                .map(|(cell, _)| self.layout.cell_area(cell))
                .sum()
        }
    }
}

mod part2 {
    use ndarray::prelude::*;

    use super::base::*;

    pub struct Lights<'a> {
        layout: &'a Layout,
        brightness: Array2<u64>,
    }

    impl<'a> Lights<'a> {
        pub fn new(layout: &'a Layout) -> Lights<'a> {
            Lights {
                layout,
                brightness: Array2::zeros(layout.shape()),
            }
        }

        #[cfg(test)]
        pub fn brightness(&self, p: &Point) -> u64 {
            match self.layout.cell_of(p) {
                Some(cell) => self.brightness[cell],
                None => 0,
            }
        }
    }

    impl LightGrid for Lights<'_> {
        fn obey(&mut self, instruction: &Instruction) {
            let (xs, ys) = self.layout.cells_of(&instruction.area);
            let mut cells = self.brightness.slice_mut(s![xs, ys]);
            match instruction.action {
                Action::TurnOn => cells.map_inplace(|b| *b += 1),
                Action::TurnOff => cells.map_inplace(|b| *b = b.saturating_sub(1)),
                Action::Toggle => cells.map_inplace(|b| *b += 2),
            }
        }

        fn total(&self) -> u128 {
            self.brightness
                .indexed_iter()
                .map(|(cell, b)| u128::from(*b) * self.layout.cell_area(cell))
                .sum()
        }
    }
}

use base::{Instruction, Layout, LightGrid};

fn run_part<T: LightGrid>(semantics: &str, instructions: &[Instruction], grid: &mut T) -> u128 {
    let span = span!(Level::DEBUG, "replay", semantics);
    let _enter = span.enter();
    for instruction in instructions {
        grid.obey(instruction);
    }
    let total = grid.total();
    event!(Level::DEBUG, "total {}", total);
    total
}

fn parse_input<I, S>(lines: I) -> Result<Vec<Instruction>, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = Vec::new();
    for (n, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let instruction =
            Instruction::try_from(line).map_err(|e| format!("line {}: {}", n + 1, e))?;
        event!(
            Level::DEBUG,
            "{:?} covering {} lights",
            instruction.action,
            instruction.area.area()
        );
        result.push(instruction);
    }
    Ok(result)
}

#[cfg(test)]
fn solve(input: &[&str]) -> (u128, u128) {
    let instructions = parse_input(input).unwrap();
    let layout = Layout::new(&instructions);
    (
        run_part("boolean", &instructions, &mut part1::Lights::new(&layout)),
        run_part("counter", &instructions, &mut part2::Lights::new(&layout)),
    )
}

#[test]
fn test_full_grid_example() {
    assert_eq!(
        solve(&[
            "turn on 0,0 through 999,999",
            "toggle 0,0 through 999,0",
            "turn off 499,499 through 500,500",
        ]),
        (998_996, 1_001_996)
    );
}

#[test]
fn test_counter_example() {
    assert_eq!(solve(&["turn on 0,0 through 0,0"]).1, 1);
    assert_eq!(
        solve(&["turn on 0,0 through 0,0", "toggle 0,0 through 0,0"]).1,
        3
    );
    assert_eq!(
        solve(&[
            "turn on 0,0 through 0,0",
            "toggle 0,0 through 0,0",
            "turn off 0,0 through 0,0",
        ])
        .1,
        2
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(solve(&[]), (0, 0));
    assert_eq!(solve(&["", "  "]), (0, 0));
}

#[test]
fn test_parse_input_reports_line() {
    let err = parse_input(["turn on 0,0 through 1,1", "", "turn on 0,0 1,1"]).unwrap_err();
    assert!(err.starts_with("line 3:"), "{}", err);
}

#[test]
fn test_whole_address_space() {
    let everything: u128 = 1 << 64;
    assert_eq!(
        solve(&["turn on 0,0 through 4294967295,4294967295"]),
        (everything, everything)
    );
    assert_eq!(
        solve(&[
            "toggle 0,0 through 4294967295,4294967295",
            "turn off 4294967295,4294967295 through 4294967295,4294967295",
        ]),
        (everything - 1, 2 * everything - 1)
    );
}

#[cfg(test)]
fn parse_all(input: &[&str]) -> Vec<Instruction> {
    parse_input(input).unwrap()
}

#[test]
fn test_turn_on_off_idempotent() {
    let instructions = parse_all(&[
        "turn on 2,2 through 6,6",
        "turn on 0,3 through 4,4",
        "turn on 0,3 through 4,4",
        "turn off 5,0 through 7,7",
        "turn off 5,0 through 7,7",
    ]);
    let layout = Layout::new(&instructions);
    let mut once = part1::Lights::new(&layout);
    run_part("boolean", &instructions[..2], &mut once);
    let mut twice = part1::Lights::new(&layout);
    run_part("boolean", &instructions[..3], &mut twice);
    let mut off_once = part1::Lights::new(&layout);
    run_part("boolean", &instructions[..4], &mut off_once);
    let mut off_twice = part1::Lights::new(&layout);
    run_part("boolean", &instructions, &mut off_twice);
    for x in 0..8 {
        for y in 0..8 {
            let p = base::Point::new(x, y);
            assert_eq!(once.is_on(&p), twice.is_on(&p));
            assert_eq!(off_once.is_on(&p), off_twice.is_on(&p));
        }
    }
    assert_eq!(once.total(), twice.total());
    assert_eq!(off_once.total(), off_twice.total());
}

#[test]
fn test_double_toggle_restores() {
    let instructions = parse_all(&[
        "turn on 1,1 through 5,3",
        "toggle 3,2 through 8,8",
        "toggle 0,0 through 4,4",
        "toggle 0,0 through 4,4",
    ]);
    let layout = Layout::new(&instructions);
    let mut before = part1::Lights::new(&layout);
    run_part("boolean", &instructions[..2], &mut before);
    let mut after = part1::Lights::new(&layout);
    run_part("boolean", &instructions, &mut after);
    for x in 0..10 {
        for y in 0..10 {
            let p = base::Point::new(x, y);
            assert_eq!(before.is_on(&p), after.is_on(&p), "at {:?}", p);
        }
    }
}

#[test]
fn test_brightness_floor() {
    let instructions = parse_all(&[
        "turn off 0,0 through 3,3",
        "turn off 0,0 through 3,3",
        "turn on 1,1 through 2,2",
    ]);
    let layout = Layout::new(&instructions);
    let mut lights = part2::Lights::new(&layout);
    assert_eq!(run_part("counter", &instructions, &mut lights), 4);
    assert_eq!(lights.brightness(&base::Point::new(0, 0)), 0);
    assert_eq!(lights.brightness(&base::Point::new(1, 1)), 1);
}

/// Replays instructions one point at a time and compares the result
/// with the compressed grids.
#[test]
fn test_matches_pointwise_replay() {
    use std::collections::{HashMap, HashSet};

    use base::{Action, Point};

    let input = [
        "turn on 0,0 through 19,9",
        "toggle 5,3 through 25,4",
        "turn off 7,0 through 7,30",
        "toggle 0,0 through 30,30",
        "turn on 12,12 through 12,12",
        "turn off 3,3 through 28,27",
        "toggle 10,1 through 11,29",
        "turn on 29,0 through 30,1",
    ];
    let instructions = parse_all(&input);

    let mut on: HashSet<Point> = HashSet::new();
    let mut brightness: HashMap<Point, u64> = HashMap::new();
    for instruction in &instructions {
        for p in instruction.area.points() {
            let b = brightness.entry(p).or_insert(0);
            match instruction.action {
                Action::TurnOn => {
                    on.insert(p);
                    *b += 1;
                }
                Action::TurnOff => {
                    on.remove(&p);
                    *b = b.saturating_sub(1);
                }
                Action::Toggle => {
                    if !on.remove(&p) {
                        on.insert(p);
                    }
                    *b += 2;
                }
            }
        }
    }
    let expected_on = on.len() as u128;
    let expected_brightness: u128 = brightness.values().map(|b| u128::from(*b)).sum();
    assert_eq!(solve(&input), (expected_on, expected_brightness));
}

fn run() -> Result<(), String> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .map_err(|e| e.to_string())?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let lines: Vec<String> = io::BufReader::new(io::stdin())
        .lines()
        .collect::<Result<_, _>>()
        .map_err(|e| format!("failed to read input: {}", e))?;
    let instructions = parse_input(&lines)?;
    let layout = Layout::new(&instructions);
    event!(
        Level::INFO,
        "{} instructions over a grid of {:?} cells",
        instructions.len(),
        layout.shape()
    );

    let lit = run_part("boolean", &instructions, &mut part1::Lights::new(&layout));
    let brightness = run_part("counter", &instructions, &mut part2::Lights::new(&layout));
    println!("Part 1: {}", lit);
    println!("Part 2: {}", brightness);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
