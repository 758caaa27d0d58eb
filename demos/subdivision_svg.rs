use cubesubdiv::{BoundingBox, GuideCurve, Hexahedron, Polyline, Subdivision, SubdivisionParams};
use plotters::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Define the output file and dimensions
    let filename = "subdivision.svg";
    let root = SVGBackend::new(filename, (1024, 768)).into_drawing_area();

    root.fill(&WHITE)?;

    // Create a 3D chart context
    let mut chart = ChartBuilder::on(&root)
        .caption("Curve-guided subdivision", ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_3d(0.0..100.0, 0.0..100.0, 0.0..100.0)?;

    chart.configure_axes().draw()?;

    // Subdivide a cube around a trefoil knot
    let bounds = BoundingBox::new(0.0, 0.0, 0.0, 100.0, 100.0, 100.0);
    let knot = Polyline::trefoil(bounds.center(), 100.0 / 7.0, 200)?;
    let params = SubdivisionParams::new(30.0, 0.3, 4.0, 0.5, 4).seeded(7);
    let cells = Subdivision::new(knot.clone(), params)?.run(Hexahedron::from_bounds(bounds))?;
    println!("{} cells", cells.len());

    // Draw the cells with transparency
    for cell in &cells {
        for face in (0..6).filter_map(|f| cell.face_loop(f)) {
            let poly: Vec<(f64, f64, f64)> = face.iter().map(|p| (p[0], p[1], p[2])).collect();
            chart.draw_series(std::iter::once(Polygon::new(poly, BLUE.mix(0.05).filled())))?;
        }
    }

    // Draw the guide curve
    let (t0, t1) = knot.domain();
    let curve: Vec<(f64, f64, f64)> = (0..=400)
        .map(|i| knot.point_at(t0 + (t1 - t0) * i as f64 / 400.0))
        .map(|p| (p[0], p[1], p[2]))
        .collect();
    chart.draw_series(LineSeries::new(curve, RED.stroke_width(2)))?;

    root.present()?;
    println!("Saved {}", filename);
    Ok(())
}
