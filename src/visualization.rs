use crate::simulation::RoundReport;
use plotters::prelude::*;
use plotters::style::full_palette::GREY;
use std::error::Error;

/// Lowest and highest fitness seen across the history, padded by one on
/// each side so the lines never sit on the chart border.
pub fn fitness_bounds(history: &[RoundReport]) -> (i32, i32) {
    let min = history.iter().map(|r| r.worst.fitness).min().unwrap_or(0);
    let max = history.iter().map(|r| r.best.fitness).max().unwrap_or(0);

    (min - 1, max + 1)
}

pub fn plot_fitness_history(
    history: &[RoundReport],
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(output_path, (1600, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let rounds = history.last().map(|r| r.round).unwrap_or(0);
    let (min_fitness, max_fitness) = fitness_bounds(history);

    let mut chart = ChartBuilder::on(&root)
        .caption("Fitness per round", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..rounds + 1, min_fitness..max_fitness)?;

    chart
        .configure_mesh()
        .x_desc("Round")
        .y_desc("Fitness")
        .x_labels(10)
        .draw()?;

    let kth_rank = history.first().map(|r| r.kth.rank).unwrap_or(0);
    let series: [(String, RGBColor, fn(&RoundReport) -> i32); 3] = [
        ("Best".to_string(), RED, |r: &RoundReport| r.best.fitness),
        (format!("Rank {}", kth_rank), BLUE, |r: &RoundReport| r.kth.fitness),
        ("Worst".to_string(), GREY, |r: &RoundReport| r.worst.fitness),
    ];

    for (label, color, fitness) in series {
        chart
            .draw_series(LineSeries::new(
                history.iter().map(|r| (r.round, fitness(r))),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    log::info!("Chart saved to {}", output_path);
    Ok(())
}
