#![allow(non_snake_case)]
use crossplot::numerical::intersect_api::IntersectionPlotter;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let (f1, f2) = if args.len() >= 3 {
        (args[1].as_str(), args[2].as_str())
    } else {
        // demo pair: a parabola against a line, two intersections
        ("x^2", "x")
    };

    let mut plotter = IntersectionPlotter::new();
    plotter.set_inputs(f1, f2);

    match plotter.solve() {
        Ok(data) => {
            if let Some(notice) = &data.notice {
                println!("{}", notice);
            }
            for (i, root) in data.roots.iter().enumerate() {
                println!("Solution {}: x={:.4}, y={:.4}", i + 1, root.x, root.y);
            }
            let path = Path::new("intersections.png");
            if let Err(e) = plotter.render_png(path) {
                eprintln!("failed to render {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            println!("plot saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
