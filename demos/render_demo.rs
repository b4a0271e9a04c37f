use inkplot::{Axis, ContourPlot, Figure, Grid, LinePlot, MeshPlot, RecordingBackend, Rgb, ScaleKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backend = RecordingBackend::new().with_heatmap();
    let log = backend.log();

    let mut fig = Figure::new(800.0, 600.0);
    fig.set_backend(backend);
    fig.subplots(2, 2);

    // Damped oscillation on a log x axis
    fig.select_subplot(0, 0);
    let xs: Vec<f64> = (1..=50).map(|i| i as f64 * 2.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| (x / 5.0).sin() / x.sqrt()).collect();
    fig.plot_fmt(&xs, &ys, "b-");
    fig.add_line(LinePlot::new(vec![2.0, 100.0], vec![0.0, 0.0]).color(Rgb::GRID).label("zero"));
    fig.set_scale(Axis::X, ScaleKind::Log);
    fig.set_title("damped");
    fig.set_legend(true);

    // Gaussian bump
    fig.select_subplot(0, 1);
    let n = 25;
    let grid: Vec<f64> = (0..n).map(|i| -2.0 + 4.0 * i as f64 / (n - 1) as f64).collect();
    let z = Grid::from_fn(n, n, |j, i| (-(grid[i] * grid[i] + grid[j] * grid[j])).exp());
    fig.add_contour(
        ContourPlot::new(grid.clone(), grid.clone(), z.clone())
            .level_count(6)
            .filled(true)
            .with_colorbar(true),
    );
    fig.set_title("contourf");

    // Same values as cells
    fig.select_subplot(1, 0);
    let edges: Vec<f64> = (0..=n).map(|i| -2.0 + 4.0 * i as f64 / n as f64).collect();
    fig.add_mesh(MeshPlot::rectilinear(&edges, &edges, z).colormap("hot"));
    fig.set_title("mesh");

    // Symmetric log
    fig.select_subplot(1, 1);
    let xs: Vec<f64> = (-50..=50).map(|i| i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x * x).collect();
    fig.plot_fmt(&xs, &ys, "r:");
    fig.set_scale(Axis::Y, ScaleKind::Symlog);
    fig.set_grid(true);
    fig.set_title("symlog");

    if let Some(e) = fig.take_error() {
        eprintln!("Error: {:?}", miette::Report::new(e));
    }
    match fig.show() {
        Ok(()) => print!("{}", log.dump()),
        Err(e) => eprintln!("Error: {}", e),
    }
}
