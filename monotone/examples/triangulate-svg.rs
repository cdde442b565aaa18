use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use monotone::{triangulate_with, Contours, Options, VertexId};
use svg::node::element::{path::Data, Circle, Path};

#[derive(Parser)]
struct Args {
    /// A contour file: a vertex count, then that many `x y` lines, repeated.
    /// A count of zero ends the input.
    input: PathBuf,
    output: PathBuf,

    /// Print the decisions taken during the sweep.
    #[arg(long)]
    trace: bool,
}

fn read_contours(text: &str) -> anyhow::Result<Vec<Vec<(f64, f64)>>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let mut contours = Vec::new();
    while let Some((line_no, line)) = lines.next() {
        let count: usize = line
            .parse()
            .with_context(|| format!("line {line_no}: expected a vertex count"))?;
        if count == 0 {
            break;
        }

        let mut contour = Vec::with_capacity(count);
        for _ in 0..count {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| anyhow!("unexpected end of input in contour {}", contours.len()))?;
            let mut coords = line.split_whitespace().map(str::parse::<f64>);
            match (coords.next(), coords.next(), coords.next()) {
                (Some(x), Some(y), None) => contour.push((
                    x.with_context(|| format!("line {line_no}: bad x coordinate"))?,
                    y.with_context(|| format!("line {line_no}: bad y coordinate"))?,
                )),
                _ => bail!("line {line_no}: expected two coordinates"),
            }
        }
        contours.push(contour);
    }
    Ok(contours)
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = std::fs::read_to_string(&args.input)?;
    let input = read_contours(&input)?;
    let contours = Contours::new(input.iter().cloned())?;
    let out = triangulate_with(&input, &Options::default().with_trace(args.trace))?;

    for ev in &out.trace {
        println!("{ev}");
    }
    println!(
        "{} vertices, {} diagonals, {} monotone pieces, {} triangles",
        contours.len(),
        out.diagonals.len(),
        out.monotone_loops.len(),
        out.triangles.len()
    );

    let Some(bounds) = contours.bounds() else {
        bail!("no contours in {}", args.input.display());
    };
    let pad = bounds.width().max(bounds.height()) / 20.0;
    let stroke_width = bounds.width().max(bounds.height()) / 256.0;
    let dot_radius = stroke_width * 1.5;
    // SVG's y axis points down.
    let pt = |v: VertexId| {
        let p = contours.point(v);
        (p.x(), -p.y())
    };

    let mut document = svg::Document::new().set(
        "viewBox",
        (
            bounds.x_min - pad,
            -bounds.y_max - pad,
            bounds.width() + 2.0 * pad,
            bounds.height() + 2.0 * pad,
        ),
    );

    for tri in &out.triangles {
        let [a, b, c] = tri.vertices();
        let data = Data::new()
            .move_to(pt(a))
            .line_to(pt(b))
            .line_to(pt(c))
            .close();
        let path = Path::new()
            .set("fill", "lightblue")
            .set("stroke", "steelblue")
            .set("stroke-width", stroke_width / 2.0)
            .set("d", data);
        document = document.add(path);
    }

    for c in 0..contours.contour_count() {
        let mut data = Data::new();
        for (i, v) in contours.contour(c).enumerate() {
            data = if i == 0 {
                data.move_to(pt(v))
            } else {
                data.line_to(pt(v))
            };
        }
        let path = Path::new()
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", stroke_width)
            .set("d", data.close());
        document = document.add(path);
    }

    for &(a, b) in &out.diagonals {
        let data = Data::new().move_to(pt(a)).line_to(pt(b));
        let path = Path::new()
            .set("stroke", "red")
            .set("stroke-width", stroke_width)
            .set("d", data);
        document = document.add(path);
    }

    for v in contours.ids() {
        let (x, y) = pt(v);
        let c = Circle::new()
            .set("r", dot_radius)
            .set("cx", x)
            .set("cy", y)
            .set("fill", "black");
        document = document.add(c);
    }

    svg::save(&args.output, &document)?;

    Ok(())
}
