//! Chart XML reader.
//!
//! Parses the subset of `c:chartSpace` that the writer produces: the plot
//! kind, literal (or cached) series data and the legend position.

use crate::common::xml::push_entity;
use crate::ooxml::charts::chart::Chart;
use crate::ooxml::charts::legend::Legend;
use crate::ooxml::charts::series::Series;
use crate::ooxml::charts::types::{ChartType, LegendPosition};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Which part of a series the current `c:v` belongs to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SeriesField {
    None,
    Title,
    Categories,
    Values,
}

/// Parse a chart XML document.
///
/// # Errors
/// Returns `InvalidFormat` when the plot area holds no bar or pie plot.
pub fn parse_chart(xml: &[u8]) -> Result<Chart> {
    let mut reader = Reader::from_reader(xml);

    let mut chart_type = None;
    let mut series: Vec<Series> = Vec::new();
    let mut legend = None;
    let mut field = SeriesField::None;
    let mut in_value = false;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"ser" => series.push(Series::new(series.len() as u32)),
                b"tx" if !series.is_empty() => field = SeriesField::Title,
                b"cat" => field = SeriesField::Categories,
                b"val" => field = SeriesField::Values,
                b"v" => {
                    in_value = true;
                    text.clear();
                },
                name => {
                    if chart_type.is_none() {
                        chart_type = ChartType::from_xml_element_name(name);
                    }
                },
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"legendPos" => {
                    let position = val_attr(e)?
                        .and_then(|v| LegendPosition::from_xml_value(&v))
                        .unwrap_or(LegendPosition::Right);
                    legend = Some(Legend::new(position));
                },
                b"overlay" => {
                    if let Some(ref mut legend) = legend {
                        legend.overlay = val_attr(e)?.as_deref() == Some("1");
                    }
                },
                _ => {},
            },
            Ok(Event::Text(ref t)) if in_value => {
                let raw = std::str::from_utf8(t.as_ref())
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                text.push_str(raw);
            },
            Ok(Event::GeneralRef(ref r)) if in_value => {
                let name = std::str::from_utf8(r.as_ref())
                    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                push_entity(&mut text, name);
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" => {
                    in_value = false;
                    if let Some(current) = series.last_mut() {
                        let value = std::mem::take(&mut text);
                        match field {
                            SeriesField::Title => current.title = Some(value),
                            SeriesField::Categories => current.categories.push(value),
                            SeriesField::Values => {
                                let number = value.trim().parse::<f64>().map_err(|_| {
                                    OoxmlError::InvalidFormat(format!(
                                        "Non-numeric chart value: {}",
                                        value
                                    ))
                                })?;
                                current.values.push(number);
                            },
                            SeriesField::None => {},
                        }
                    }
                },
                b"tx" | b"cat" | b"val" => field = SeriesField::None,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("Chart parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    let chart_type = chart_type
        .ok_or_else(|| OoxmlError::InvalidFormat("Chart has no bar or pie plot".to_string()))?;
    let mut chart = match chart_type {
        ChartType::Bar => Chart::clustered_column(Series::new(0)),
        ChartType::Pie => Chart::pie(Series::new(0)),
    };
    chart.series = series;
    Ok(chart.with_legend(legend))
}

fn val_attr(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OoxmlError::Xml(e.to_string()))?;
        if attr.key.as_ref() == b"val" {
            let value = std::str::from_utf8(&attr.value)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::writer::chart_to_xml;

    #[test]
    fn test_reads_back_written_bar_chart() {
        let series = Series::new(0)
            .with_title("Revenue & cost")
            .with_categories(vec!["Q1".to_string(), "Q2".to_string()])
            .with_values(vec![1.25, -3.0]);
        let written = Chart::clustered_column(series);
        let xml = chart_to_xml(&written).unwrap();

        let parsed = parse_chart(xml.as_bytes()).unwrap();
        assert_eq!(parsed.chart_type, ChartType::Bar);
        assert_eq!(parsed.series, written.series);
        assert_eq!(parsed.legend, Some(Legend::new(LegendPosition::Bottom)));
    }

    #[test]
    fn test_labels_keep_entities_and_spaces() {
        let series = Series::new(0)
            .with_title(" Pro & Team ")
            .with_categories(vec![" padded ".to_string(), "<&>".to_string()])
            .with_values(vec![1.0, 2.0]);
        let xml = chart_to_xml(&Chart::pie(series.clone())).unwrap();
        let parsed = parse_chart(xml.as_bytes()).unwrap();
        assert_eq!(parsed.series, vec![series]);
    }

    #[test]
    fn test_values_tolerate_surrounding_whitespace() {
        let xml = br#"<c:chartSpace xmlns:c="x"><c:chart><c:plotArea><c:pieChart><c:ser><c:val><c:numLit><c:pt idx="0"><c:v> 4.5
</c:v></c:pt></c:numLit></c:val></c:ser></c:pieChart></c:plotArea></c:chart></c:chartSpace>"#;
        let parsed = parse_chart(xml).unwrap();
        assert_eq!(parsed.series[0].values, vec![4.5]);
    }

    #[test]
    fn test_reads_pie_legend() {
        let series = Series::new(0)
            .with_categories(vec!["Free".to_string()])
            .with_values(vec![100.0]);
        let xml = chart_to_xml(&Chart::pie(series)).unwrap();
        let parsed = parse_chart(xml.as_bytes()).unwrap();
        assert_eq!(parsed.chart_type, ChartType::Pie);
        assert_eq!(parsed.legend.map(|l| l.position), Some(LegendPosition::Right));
    }

    #[test]
    fn test_rejects_unsupported_plot() {
        let xml = br#"<c:chartSpace xmlns:c="x"><c:chart><c:plotArea><c:lineChart></c:lineChart></c:plotArea></c:chart></c:chartSpace>"#;
        assert!(matches!(parse_chart(xml), Err(OoxmlError::InvalidFormat(_))));
    }
}
