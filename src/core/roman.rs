// Roman numeral parsing and encoding over the supported 1-3999 range.
// The parser layers fast pattern rejects over a subtractive-pair scan;
// the canonical re-encode check at the end is authoritative for anything
// the pattern list misses.

pub const MIN_VALUE: u16 = 1;
pub const MAX_VALUE: u16 = 3999;

const ENCODE_TABLE: [(u16, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

// Doubled V/L/D, quadrupled I/X/C/M, and every subtractive adjacency
// outside I before V/X, X before L/C, C before D/M.
const FORBIDDEN_RUNS: [&str; 22] = [
    "VV", "LL", "DD", "IIII", "XXXX", "CCCC", "MMMM", "IL", "IC", "ID", "IM", "VX", "VL", "VC",
    "VD", "VM", "XD", "XM", "LC", "LD", "LM", "DM",
];

fn symbol_value(symbol: char) -> Option<u16> {
    match symbol {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

fn subtractive_pair_allowed(current: char, next: char) -> bool {
    matches!(
        (current, next),
        ('I', 'V' | 'X') | ('X', 'L' | 'C') | ('C', 'D' | 'M')
    )
}

/// Encodes an integer into its canonical Roman numeral. Returns `None`
/// outside [1, 3999]; values in that range always encode.
pub fn encode_arabic(value: i64) -> Option<String> {
    if value < i64::from(MIN_VALUE) || value > i64::from(MAX_VALUE) {
        return None;
    }
    let mut remaining = value as u16;
    let mut encoded = String::new();
    for (step, group) in ENCODE_TABLE {
        while remaining >= step {
            encoded.push_str(group);
            remaining -= step;
        }
    }
    Some(encoded)
}

/// Decodes a Roman numeral into its integer value. Input is trimmed and
/// case-folded; anything that is not the canonical spelling of a value in
/// [1, 3999] returns `None`.
pub fn parse_roman(input: &str) -> Option<u16> {
    let text = input.trim().to_uppercase();
    if text.is_empty() {
        return None;
    }
    if !text.chars().all(|symbol| symbol_value(symbol).is_some()) {
        return None;
    }
    if FORBIDDEN_RUNS.iter().any(|run| text.contains(run)) {
        return None;
    }

    let symbols: Vec<char> = text.chars().collect();
    let mut total: u32 = 0;
    let mut index = 0;
    while index < symbols.len() {
        let current = symbols[index];
        let current_value = symbol_value(current)?;
        let next = symbols.get(index + 1).copied();
        let next_value = next.and_then(symbol_value).unwrap_or(0);
        if next_value > current_value {
            if !subtractive_pair_allowed(current, next?) {
                return None;
            }
            total += u32::from(next_value - current_value);
            index += 2;
        } else {
            total += u32::from(current_value);
            index += 1;
        }
    }

    if total < u32::from(MIN_VALUE) || total > u32::from(MAX_VALUE) {
        return None;
    }
    let total = total as u16;

    // Numerically consistent but non-canonical orderings ("IIX", "VIV")
    // survive the scan; the round trip rejects them.
    if encode_arabic(i64::from(total))? != text {
        return None;
    }
    Some(total)
}
