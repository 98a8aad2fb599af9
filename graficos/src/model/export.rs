use std::path::{Path, PathBuf};

use plotters::backend::SVGBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::{chart::ChartKind, Chart, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
}

impl ImageFormat {
    /// Picks the output format from the file extension. A path without
    /// extension is written as PNG, with `.png` appended.
    pub fn resolve(path: &Path) -> Result<(PathBuf, ImageFormat), ModelError> {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return Ok((path.with_extension("png"), ImageFormat::Png));
        };
        let format = match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "svg" => ImageFormat::Svg,
            other => return Err(ModelError::UnsupportedFormat(other.to_string())),
        };
        Ok((path.to_path_buf(), format))
    }
}

/// Writes a chart to an image file.
pub trait ChartWriter {
    fn write(&self, chart: &Chart, path: &Path, format: ImageFormat) -> Result<(), String>;
}

/// Renders charts with `plotters`.
#[derive(Debug, Clone)]
pub struct PlottersWriter {
    width: u32,
    height: u32,
}

impl PlottersWriter {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ChartWriter for PlottersWriter {
    fn write(&self, chart: &Chart, path: &Path, format: ImageFormat) -> Result<(), String> {
        log::debug!("rendering {:?} chart to {:?} as {:?}", chart.kind, path, format);
        let size = (self.width, self.height);
        match format {
            ImageFormat::Png | ImageFormat::Jpeg => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                draw(&root, chart)
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                draw(&root, chart)
            }
        }
    }
}

const SERIES_COLOR: RGBColor = RGBColor(30, 58, 95);
const TEXT_COLOR: RGBColor = RGBColor(40, 40, 40);

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> Result<(), String> {
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let (xmin, xmax) = chart.x_range();
    let (ymin, ymax) = chart.y_range();
    let mut ctx = ChartBuilder::on(root)
        .margin(20)
        .caption(&chart.title, ("sans-serif", 24).into_font().color(&TEXT_COLOR))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(|e| e.to_string())?;

    let category_label = |x: &f64| chart.category_at(*x).unwrap_or_default().to_string();
    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style(("sans-serif", 16).into_font().color(&TEXT_COLOR))
        .label_style(("sans-serif", 14).into_font().color(&TEXT_COLOR));
    if chart.uses_categories() {
        mesh.x_labels(chart.points.len().max(2))
            .x_label_formatter(&category_label)
            .disable_x_mesh();
    }
    mesh.draw().map_err(|e| e.to_string())?;

    let coordinates = chart.coordinates();
    match chart.kind {
        ChartKind::Bars => {
            ctx.draw_series(coordinates.iter().map(|&(x, y)| {
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], SERIES_COLOR.filled())
            }))
            .map_err(|e| e.to_string())?;
        }
        ChartKind::Lines => {
            ctx.draw_series(LineSeries::new(
                coordinates.iter().copied(),
                SERIES_COLOR.stroke_width(2),
            ))
            .map_err(|e| e.to_string())?;
            ctx.draw_series(
                coordinates
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, SERIES_COLOR.filled())),
            )
            .map_err(|e| e.to_string())?;
        }
    }

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartPoint;

    #[test]
    fn test_resolve_format() {
        let (path, format) = ImageFormat::resolve(Path::new("/tmp/out.PNG")).unwrap();
        assert_eq!((path.as_path(), format), (Path::new("/tmp/out.PNG"), ImageFormat::Png));

        let (_, format) = ImageFormat::resolve(Path::new("a.jpeg")).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        let (_, format) = ImageFormat::resolve(Path::new("a.svg")).unwrap();
        assert_eq!(format, ImageFormat::Svg);
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let (path, format) = ImageFormat::resolve(Path::new("grafico")).unwrap();
        assert_eq!(path, PathBuf::from("grafico.png"));
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_pdf_is_rejected() {
        let err = ImageFormat::resolve(Path::new("grafico.pdf")).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(ext) if ext == "pdf"));
        assert!(err_is_validation(&ImageFormat::resolve(Path::new("x.txt"))));
    }

    fn sample_chart(kind: ChartKind) -> Chart {
        let points = [("A", 1.0), ("B", 3.5), ("C", 2.0)]
            .into_iter()
            .map(|(category, y)| ChartPoint {
                category: category.to_string(),
                x: None,
                y,
            })
            .collect();
        Chart {
            kind,
            title: "Vendas".to_string(),
            x_label: "Categoria".to_string(),
            y_label: "Valor".to_string(),
            points,
        }
    }

    #[test]
    fn test_plotters_writes_image_files() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let writer = PlottersWriter::new(320, 240);

        let cases = [
            ("barras.png", ChartKind::Bars, ImageFormat::Png),
            ("linhas.svg", ChartKind::Lines, ImageFormat::Svg),
            ("barras.jpg", ChartKind::Bars, ImageFormat::Jpeg),
        ];
        for (name, kind, format) in cases {
            let path = dir.path().join(name);
            writer.write(&sample_chart(kind), &path, format).unwrap();
            let size = std::fs::metadata(&path).unwrap().len();
            assert!(size > 0, "{name} is empty");
        }

        let svg = std::fs::read_to_string(dir.path().join("linhas.svg")).unwrap();
        assert!(svg.contains("<svg"));
    }

    fn err_is_validation(res: &Result<(PathBuf, ImageFormat), ModelError>) -> bool {
        res.as_ref().err().is_some_and(ModelError::is_validation)
    }
}
