//! Symbolic register name resolution, independent of the assembler's
//! token scanning so it can be unit-tested on its own.

pub const REGISTER_COUNT: usize = 32;

const NAMES: &[&str] = &[
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

/// Resolves a register token, with or without the leading `$`, to its
/// numeric index. Accepts both symbolic names (`$t0`) and raw numbers
/// (`$8`, `8`).
pub fn resolve(token: &str) -> Option<u8> {
    let name = token.strip_prefix('$').unwrap_or(token);
    if let Some(idx) = NAMES.iter().position(|n| *n == name) {
        return Some(idx as u8);
    }
    let idx: u32 = name.parse().ok()?;
    if idx < REGISTER_COUNT as u32 {
        Some(idx as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_symbolic_names() {
        assert_eq!(resolve("$t0"), Some(8));
        assert_eq!(resolve("$zero"), Some(0));
        assert_eq!(resolve("$ra"), Some(31));
    }

    #[test]
    fn resolves_numeric_form() {
        assert_eq!(resolve("$8"), Some(8));
        assert_eq!(resolve("8"), Some(8));
    }

    #[test]
    fn rejects_out_of_range_and_unknown() {
        assert_eq!(resolve("$32"), None);
        assert_eq!(resolve("$bogus"), None);
    }
}
