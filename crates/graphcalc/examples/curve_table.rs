//! Print a small value table for a formula and the vector summary of a fixed path.
//!
//! Usage: `cargo run -p graphcalc --example curve_table -- "sin(x) / x"`

use graphcalc::prelude::*;

fn main() {
    let text = std::env::args().nth(1).unwrap_or_else(|| "sin(x)".to_string());
    let expr = match parse(&text) {
        Ok(e) => e,
        Err(err) => {
            eprintln!("cannot parse {text:?}: {err}");
            std::process::exit(2);
        }
    };

    let series = sample_with(&expr, Domain::new(-2.0, 2.0, 0.5), &SampleCfg::default())
        .expect("fixed domain is valid");
    println!("f(x) = {expr}");
    for p in series.points() {
        println!("  x={:>5.2}  y={:>10.6}", p.x, p.y);
    }
    if series.degenerate_count() > 0 {
        println!("  ({} degenerate samples snapped to 0)", series.degenerate_count());
    }

    let path = [
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        Vec3::new(-3.0, 0.0, 0.0),
    ];
    let h = HeadToTail::new(&path);
    let polar = to_polar(h.resultant.x, h.resultant.y);
    println!(
        "resultant=({:.3}, {:.3}) r={:.3} theta={:.2}deg area={:.3}",
        h.resultant.x, h.resultant.y, polar.r, polar.theta_deg, h.area
    );
}
