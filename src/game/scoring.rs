/// Points for clearing `lines` rows in one lock, at the level in effect
/// before any level-up that clear causes.
pub fn line_clear_points(lines: usize, level: usize) -> u64 {
    let base = match lines {
        1 => 30,
        2 => 150,
        3 => 400,
        4 => 1500,
        _ => 0,
    };
    base * (level as u64 + 1)
}
