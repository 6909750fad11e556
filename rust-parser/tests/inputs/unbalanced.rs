fn main() {
    let pair = (1, 2;
}
