// ============================================================================
// Basic Usage Example
// ============================================================================

use numeral_engine::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Numeral Engine Example ===\n");

    // Parse the same value through different grammars
    println!("Parsing literals...");
    for text in ["31", "0x1F", "1F:H", "0b11111", "37:O", "3.1e1"] {
        let number = Number::parse(text).unwrap();
        println!("  {:>8} -> {}", text, number);
    }

    // Scanning splits messy input into prolog, literal and tail
    println!("\n=== Scanning Messy Input ===");
    for text in ["  007.5e2xyz", "123abc", ":H"] {
        let report = Number::scan(text);
        println!(
            "  {:?}: prolog={:?} recognized={:?} tail={:?}",
            text,
            report.prolog(),
            report.recognized(),
            report.invalid_tail()
        );
    }

    // Arithmetic under the thread context
    println!("\n=== Arithmetic ===");
    let a = Number::parse("1.5").unwrap();
    let b = Number::parse("0.25").unwrap();
    println!("  {} + {} = {}", a, b, &a + &b);
    println!("  {} - {} = {}", a, b, &a - &b);
    println!("  {} * {} = {}", a, b, &a * &b);
    println!("  {} / {} = {}", a, b, &a / &b);
    println!("  {} % {} = {}", a, b, &a % &b);

    let one = Number::parse("1").unwrap();
    let three = Number::parse("3").unwrap();
    clear_flags();
    let third = &one / &three;
    println!("  1 / 3 = {} (inexact: {})", third, flags().inexact);

    // Formatting
    println!("\n=== Formatting ===");
    let value = Number::parse("123.456").unwrap();
    for format in ["", "G4", "e2", "E2", "F1", "F4"] {
        println!("  {:>4}: {}", format, value.format(format).unwrap());
    }

    let comma = NumberLocale::decimal_comma();
    println!("  comma locale F2: {}", value.format_with("F2", &comma).unwrap());

    // Precision contexts are per thread
    println!("\n=== Precision Contexts ===");
    let wide = Number::parse("0.1").unwrap();
    println!("  0.1 at {} bits: {}", thread_context().significand_bits, wide);
    std::thread::spawn(|| {
        set_thread_context(NumericContext::single_precision()).unwrap();
        let narrow = Number::parse("0.1").unwrap();
        println!("  0.1 at {} bits: {}", thread_context().significand_bits, narrow);
    })
    .join()
    .unwrap();
}
