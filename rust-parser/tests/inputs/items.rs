use std::fmt::{self, Display};

const MAX_DEPTH: usize = 8;

static COUNTER: u32 = 0;

#[derive(Debug, Clone, Copy)]
pub struct Point {
    x: i64,
    y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Point {
        Point { x, y }
    }
}

pub enum Shape {
    Circle(f64),
    Rect { w: f64, h: f64 },
}

pub trait Area {
    fn area(&self) -> f64;
}

impl Area for Shape {
    fn area(&self) -> f64 {
        match self {
            Shape::Circle(r) => 3.14 * r * r,
            Shape::Rect { w, h } => w * h,
        }
    }
}

type Meters = f64;

mod geometry {
    pub fn origin() -> super::Point {
        super::Point::new(0, 0)
    }
}

macro_rules! square {
    ($x:expr) => {
        $x * $x
    };
}

fn main() {
    let _ = square!(MAX_DEPTH);
    println!("{}", COUNTER);
}
