struct Valid;

struct Broken {
    x: i32
    y: i32
}

fn still_here() -> u8 {
    1
}
