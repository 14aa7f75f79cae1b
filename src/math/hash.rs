/// FNV-1a over the UTF-8 bytes of `label`
pub fn label_hash(label: &str) -> u32 {
    const OFFSET: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;

    label
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ byte as u32).wrapping_mul(PRIME))
}

/// Deterministic per-label offsets on two axes, each in [-1, 1]
pub fn label_jitter(label: &str) -> (f32, f32) {
    let h = label_hash(label);
    let a = (h % 201) as f32 / 100.0 - 1.0;
    let b = ((h / 201) % 201) as f32 / 100.0 - 1.0;
    (a, b)
}
