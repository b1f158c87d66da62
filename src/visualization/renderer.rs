//! Three-panel comparison chart
//!
//! Panels, top to bottom:
//! 1. Grouped bars of both pitch-class distributions
//! 2. Pitch contour scatter (frame time vs Hz) of both recordings
//! 3. Per-class agreement bars with the scores printed on the panel
//!
//! Written as SVG so that no font files are needed to render.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::distribution::{analyze_note_distribution, NoteDistribution};
use crate::features::notes::PitchClass;
use crate::features::pitch::{PitchExtractor, PitchFeatures};
use crate::similarity::swara::{distribution_similarity, per_class_similarity};
use crate::similarity::{compare_features, SimilarityScores};

/// Chart size in pixels
const CHART_SIZE: (u32, u32) = (1500, 1200);

const FIRST_COLOR: RGBColor = BLUE;
const SECOND_COLOR: RGBColor = RED;
const AGREEMENT_COLOR: RGBColor = RGBColor(0, 128, 0);

type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Everything the renderer draws, derived from two feature sets
#[derive(Debug, Clone)]
pub struct ComparisonChart<'a> {
    /// Legend label of the first recording
    pub label1: &'a str,
    /// Legend label of the second recording
    pub label2: &'a str,
    /// Features of the first recording
    pub features1: &'a PitchFeatures,
    /// Features of the second recording
    pub features2: &'a PitchFeatures,
    /// Scores printed on the third panel
    pub scores: SimilarityScores,
    /// Seconds per retained frame index on the contour panel
    pub hop_seconds: f32,
}

/// Render the comparison chart of two feature sets to `output_path`
///
/// # Errors
///
/// Returns `AnalysisError::RenderError` if drawing or writing the file fails.
pub fn render_comparison(chart: &ComparisonChart<'_>, output_path: &Path) -> Result<(), AnalysisError> {
    log::debug!("Rendering comparison chart to {}", output_path.display());

    draw(chart, output_path).map_err(|e| {
        AnalysisError::RenderError(format!("{}: {}", output_path.display(), e))
    })?;

    Ok(())
}

/// Extract both recordings and render their comparison chart
///
/// Stand-alone entry point for callers that only want the picture; the
/// [`Comparator`](crate::analysis::Comparator) reuses the features it scored
/// instead of extracting again.
///
/// # Returns
///
/// Path of the written chart
pub fn visualize_comparison<P: AsRef<Path>, Q: AsRef<Path>, R: AsRef<Path>>(
    extractor: &PitchExtractor,
    file1: P,
    file2: Q,
    output_path: R,
) -> Result<PathBuf, AnalysisError> {
    let (file1, file2) = (file1.as_ref(), file2.as_ref());
    let features1 = extractor.extract_pitch_features(file1)?;
    let features2 = extractor.extract_pitch_features(file2)?;
    let config: &AnalysisConfig = extractor.config();

    let label1 = display_name(file1);
    let label2 = display_name(file2);
    let chart = ComparisonChart {
        label1: &label1,
        label2: &label2,
        features1: &features1,
        features2: &features2,
        scores: compare_features(&features1, &features2, config),
        hop_seconds: config.hop_seconds(),
    };

    let output_path = output_path.as_ref();
    render_comparison(&chart, output_path)?;
    Ok(output_path.to_path_buf())
}

/// File name of a path for legends and logs, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn draw(chart: &ComparisonChart<'_>, output_path: &Path) -> DrawResult<()> {
    let root = SVGBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((3, 1));

    let dist1 = analyze_note_distribution(&chart.features1.note_sequence);
    let dist2 = analyze_note_distribution(&chart.features2.note_sequence);
    let classes = dist1.union_classes(&dist2);

    draw_distributions(&panels[0], chart, &dist1, &dist2, &classes)?;
    draw_contours(&panels[1], chart)?;
    draw_agreement(&panels[2], chart, &dist1, &dist2, &classes)?;

    root.present()?;
    Ok(())
}

/// Segment label for pitch-class index `i`
fn class_label(classes: &[PitchClass], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => classes
            .get(*i as usize)
            .map(|pc| pc.name().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_distributions(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ComparisonChart<'_>,
    dist1: &NoteDistribution,
    dist2: &NoteDistribution,
    classes: &[PitchClass],
) -> DrawResult<()> {
    let slots = classes.len().max(1) as u32;
    let y_max = classes
        .iter()
        .map(|&pc| dist1.get(pc).max(dist2.get(pc)))
        .fold(0.0f32, f32::max)
        .max(0.1) as f64
        * 1.1;

    let mut ctx = ChartBuilder::on(area)
        .caption("Note Distribution Comparison", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..y_max)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&|v| class_label(classes, v))
        .y_desc("Share of frames")
        .draw()?;

    // First recording on the left half of each slot, second on the right
    ctx.draw_series(classes.iter().enumerate().map(|(i, &pc)| {
        let i = i as u32;
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::CenterOf(i), dist1.get(pc) as f64),
            ],
            FIRST_COLOR.filled(),
        )
    }))?
    .label(chart.label1)
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], FIRST_COLOR.filled()));

    ctx.draw_series(classes.iter().enumerate().map(|(i, &pc)| {
        let i = i as u32;
        Rectangle::new(
            [
                (SegmentValue::CenterOf(i), 0.0),
                (SegmentValue::Exact(i + 1), dist2.get(pc) as f64),
            ],
            SECOND_COLOR.filled(),
        )
    }))?
    .label(chart.label2)
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], SECOND_COLOR.filled()));

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_contours(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ComparisonChart<'_>,
) -> DrawResult<()> {
    let hop = chart.hop_seconds as f64;
    let longest = chart.features1.len().max(chart.features2.len()).max(1);
    let x_max = longest as f64 * hop;
    let y_max = chart
        .features1
        .pitch_sequence
        .iter()
        .chain(chart.features2.pitch_sequence.iter())
        .copied()
        .fold(0.0f32, f32::max)
        .max(100.0) as f64
        * 1.05;

    let mut ctx = ChartBuilder::on(area)
        .caption("Pitch Contour Comparison", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    ctx.configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Frequency (Hz)")
        .draw()?;

    for (features, label, color) in [
        (chart.features1, chart.label1, FIRST_COLOR),
        (chart.features2, chart.label2, SECOND_COLOR),
    ] {
        let style = color.mix(0.6).filled();
        ctx.draw_series(
            features
                .pitch_sequence
                .iter()
                .enumerate()
                .map(move |(t, &hz)| Circle::new((t as f64 * hop, hz as f64), 2, style)),
        )?
        .label(label)
        .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
    }

    ctx.configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_agreement(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ComparisonChart<'_>,
    dist1: &NoteDistribution,
    dist2: &NoteDistribution,
    classes: &[PitchClass],
) -> DrawResult<()> {
    let per_class = per_class_similarity(dist1, dist2);
    let note_similarity = distribution_similarity(dist1, dist2);
    let slots = classes.len().max(1) as u32;

    let mut ctx = ChartBuilder::on(area)
        .caption("Note Similarity (1 - Absolute Difference)", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..1f64)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&|v| class_label(classes, v))
        .y_desc("Similarity Score")
        .draw()?;

    ctx.draw_series(per_class.iter().enumerate().map(|(i, &(_, score))| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), score as f64),
            ],
            AGREEMENT_COLOR.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    let (width, _) = area.dim_in_pixel();
    let x = width as i32 - 380;
    let annotations = [
        format!("Overall Note Similarity: {:.3}", note_similarity),
        format!("Pattern Similarity: {:.3}", chart.scores.pattern),
        format!("Swara/Note Similarity: {:.3}", chart.scores.swara),
    ];
    for (row, text) in annotations.iter().enumerate() {
        area.draw(&Text::new(
            text.as_str(),
            (x, 50 + row as i32 * 22),
            ("sans-serif", 16).into_font(),
        ))?;
    }

    Ok(())
}
