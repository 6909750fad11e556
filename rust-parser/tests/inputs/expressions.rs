fn compute(a: i32, b: i32) -> i32 {
    let sum = a + b;
    let mut total = 0;
    total += sum;
    if sum > 10 { sum * 2 } else { -total }
}

fn describe(items: &[u8]) -> &'static str {
    match items.len() {
        0 => "empty",
        _ => "some",
    }
}
