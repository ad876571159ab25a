//! Chart XML writer.
//!
//! Generates the `c:chartSpace` part for bar and pie charts.

use crate::common::xml::escape_xml;
use crate::ooxml::charts::chart::Chart;
use crate::ooxml::charts::legend::Legend;
use crate::ooxml::charts::series::Series;
use crate::ooxml::charts::types::{AxisPosition, ChartType};
use std::io::Write;

const CATEGORY_AXIS_ID: u32 = 500000001;
const VALUE_AXIS_ID: u32 = 500000002;

/// Write a chart to XML.
pub fn write_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    write!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
    )?;
    write!(
        writer,
        r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" "#
    )?;
    write!(
        writer,
        r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#
    )?;
    write!(
        writer,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#
    )?;

    write!(writer, r#"<c:date1904 val="0"/>"#)?;
    write!(writer, r#"<c:lang val="en-US"/>"#)?;
    write!(writer, r#"<c:roundedCorners val="0"/>"#)?;

    write!(writer, "<c:chart>")?;
    write!(writer, r#"<c:autoTitleDeleted val="1"/>"#)?;

    write!(writer, "<c:plotArea><c:layout/>")?;
    match chart.chart_type {
        ChartType::Bar => write_bar_chart(writer, chart)?,
        ChartType::Pie => write_pie_chart(writer, chart)?,
    }
    if chart.chart_type.has_axes() {
        write_category_axis(writer)?;
        write_value_axis(writer)?;
    }
    write!(writer, "</c:plotArea>")?;

    if let Some(ref legend) = chart.legend {
        write_legend(writer, legend)?;
    }

    write!(writer, r#"<c:plotVisOnly val="1"/>"#)?;
    write!(writer, r#"<c:dispBlanksAs val="gap"/>"#)?;
    write!(writer, "</c:chart>")?;

    write!(
        writer,
        r#"<c:txPr><a:bodyPr/><a:lstStyle/><a:p><a:pPr><a:defRPr sz="1800"/></a:pPr><a:endParaRPr lang="en-US"/></a:p></c:txPr>"#
    )?;
    write!(writer, "</c:chartSpace>")?;

    Ok(())
}

/// Render a chart into an owned XML string.
pub fn chart_to_xml(chart: &Chart) -> std::io::Result<String> {
    let mut buf = Vec::with_capacity(2048);
    write_chart(&mut buf, chart)?;
    String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

fn write_bar_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    let element = chart.chart_type.xml_element_name();
    write!(writer, "<c:{}>", element)?;
    write!(
        writer,
        r#"<c:barDir val="{}"/>"#,
        chart.bar_direction.xml_value()
    )?;
    write!(
        writer,
        r#"<c:grouping val="{}"/>"#,
        chart.grouping.xml_value()
    )?;
    write!(
        writer,
        r#"<c:varyColors val="{}"/>"#,
        if chart.vary_colors { "1" } else { "0" }
    )?;

    for series in &chart.series {
        write_series(writer, series, ChartType::Bar)?;
    }

    write_data_labels_default(writer)?;
    write!(writer, r#"<c:gapWidth val="150"/>"#)?;
    write!(
        writer,
        r#"<c:axId val="{}"/><c:axId val="{}"/>"#,
        CATEGORY_AXIS_ID, VALUE_AXIS_ID
    )?;
    write!(writer, "</c:{}>", element)?;

    Ok(())
}

fn write_pie_chart<W: Write>(writer: &mut W, chart: &Chart) -> std::io::Result<()> {
    let element = chart.chart_type.xml_element_name();
    write!(writer, "<c:{}>", element)?;
    write!(
        writer,
        r#"<c:varyColors val="{}"/>"#,
        if chart.vary_colors { "1" } else { "0" }
    )?;

    for series in &chart.series {
        write_series(writer, series, ChartType::Pie)?;
    }

    write_data_labels_default(writer)?;
    write!(writer, r#"<c:firstSliceAng val="0"/>"#)?;
    write!(writer, "</c:{}>", element)?;

    Ok(())
}

fn write_series<W: Write>(writer: &mut W, series: &Series, kind: ChartType) -> std::io::Result<()> {
    write!(writer, "<c:ser>")?;
    write!(writer, r#"<c:idx val="{}"/>"#, series.index)?;
    write!(writer, r#"<c:order val="{}"/>"#, series.order)?;

    if let Some(ref title) = series.title {
        write!(writer, "<c:tx><c:v>{}</c:v></c:tx>", escape_xml(title))?;
    }

    if kind == ChartType::Bar {
        write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;
    }

    write_string_literal(writer, "c:cat", &series.categories)?;
    write_numeric_literal(writer, "c:val", &series.values)?;

    write!(writer, "</c:ser>")?;

    Ok(())
}

fn write_string_literal<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[String],
) -> std::io::Result<()> {
    write!(writer, "<{}>", tag)?;
    write!(writer, "<c:strLit>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, val) in values.iter().enumerate() {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            i,
            escape_xml(val)
        )?;
    }
    write!(writer, "</c:strLit>")?;
    write!(writer, "</{}>", tag)?;

    Ok(())
}

fn write_numeric_literal<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[f64],
) -> std::io::Result<()> {
    write!(writer, "<{}>", tag)?;
    write!(writer, "<c:numLit>")?;
    write!(writer, "<c:formatCode>General</c:formatCode>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, values.len())?;
    for (i, val) in values.iter().enumerate() {
        write!(writer, r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#, i, val)?;
    }
    write!(writer, "</c:numLit>")?;
    write!(writer, "</{}>", tag)?;

    Ok(())
}

fn write_data_labels_default<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(writer, "<c:dLbls>")?;
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="0"/>"#)?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="0"/>"#)?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

/// Shared axis body: id, scaling, position, ticks and crossing axis.
fn write_axis_common<W: Write>(
    writer: &mut W,
    axis_id: u32,
    position: AxisPosition,
    cross_axis_id: u32,
    major_gridlines: bool,
) -> std::io::Result<()> {
    write!(writer, r#"<c:axId val="{}"/>"#, axis_id)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="{}"/>"#, position.xml_value())?;
    if major_gridlines {
        write!(writer, "<c:majorGridlines/>")?;
    }
    write!(writer, r#"<c:numFmt formatCode="General" sourceLinked="1"/>"#)?;
    write!(writer, r#"<c:majorTickMark val="out"/>"#)?;
    write!(writer, r#"<c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    write!(writer, r#"<c:crossAx val="{}"/>"#, cross_axis_id)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;
    Ok(())
}

fn write_category_axis<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(writer, "<c:catAx>")?;
    write_axis_common(
        writer,
        CATEGORY_AXIS_ID,
        AxisPosition::Bottom,
        VALUE_AXIS_ID,
        false,
    )?;
    write!(writer, r#"<c:auto val="1"/>"#)?;
    write!(writer, r#"<c:lblAlgn val="ctr"/>"#)?;
    write!(writer, r#"<c:lblOffset val="100"/>"#)?;
    write!(writer, r#"<c:noMultiLvlLbl val="0"/>"#)?;
    write!(writer, "</c:catAx>")?;
    Ok(())
}

fn write_value_axis<W: Write>(writer: &mut W) -> std::io::Result<()> {
    write!(writer, "<c:valAx>")?;
    write_axis_common(
        writer,
        VALUE_AXIS_ID,
        AxisPosition::Left,
        CATEGORY_AXIS_ID,
        true,
    )?;
    write!(writer, r#"<c:crossBetween val="between"/>"#)?;
    write!(writer, "</c:valAx>")?;
    Ok(())
}

fn write_legend<W: Write>(writer: &mut W, legend: &Legend) -> std::io::Result<()> {
    write!(writer, "<c:legend>")?;
    write!(
        writer,
        r#"<c:legendPos val="{}"/>"#,
        legend.position.xml_value()
    )?;
    write!(writer, "<c:layout/>")?;
    write!(
        writer,
        r#"<c:overlay val="{}"/>"#,
        if legend.overlay { "1" } else { "0" }
    )?;
    write!(writer, "</c:legend>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> Series {
        Series::new(0)
            .with_title("Series 1")
            .with_categories(vec!["A".to_string(), "B".to_string(), "C".to_string()])
            .with_values(vec![10.0, 20.0, 30.0])
    }

    #[test]
    fn test_bar_chart_xml() {
        let xml = chart_to_xml(&Chart::clustered_column(sample_series())).unwrap();
        assert!(xml.contains(r#"<c:barDir val="col"/>"#));
        assert!(xml.contains(r#"<c:grouping val="clustered"/>"#));
        assert!(xml.contains(r#"<c:legendPos val="b"/>"#));
        assert!(xml.contains("<c:tx><c:v>Series 1</c:v></c:tx>"));
        assert!(xml.contains(r#"<c:pt idx="2"><c:v>30</c:v></c:pt>"#));
        assert!(xml.contains("<c:catAx>"));
        assert!(xml.contains("<c:valAx>"));
    }

    #[test]
    fn test_pie_chart_has_no_axes() {
        let xml = chart_to_xml(&Chart::pie(sample_series())).unwrap();
        assert!(xml.contains("<c:pieChart>"));
        assert!(xml.contains(r#"<c:varyColors val="1"/>"#));
        assert!(xml.contains(r#"<c:legendPos val="r"/>"#));
        assert!(!xml.contains("<c:catAx>"));
        assert!(!xml.contains("<c:axId"));
    }

    #[test]
    fn test_category_labels_are_escaped() {
        let series = Series::new(0)
            .with_categories(vec!["R&D <core>".to_string()])
            .with_values(vec![1.5]);
        let xml = chart_to_xml(&Chart::clustered_column(series)).unwrap();
        assert!(xml.contains("R&amp;D &lt;core&gt;"));
        assert!(xml.contains("<c:v>1.5</c:v>"));
    }

    #[test]
    fn test_empty_series_writes_zero_points() {
        let xml = chart_to_xml(&Chart::clustered_column(Series::new(0))).unwrap();
        assert!(xml.contains(r#"<c:ptCount val="0"/>"#));
    }
}
