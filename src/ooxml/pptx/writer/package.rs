//! Assembles a `MutablePresentation` into an OPC package.
//!
//! Part layout:
//!
//! - `/ppt/presentation.xml` relates to the master, the property parts, the
//!   theme and then every slide
//! - `/ppt/slides/slideN.xml` relates to its layout, then its images and
//!   charts in shape order
//! - charts and media are numbered across the whole presentation

use crate::ooxml::charts::writer::chart_to_xml;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, Part, PackageWriter};
use crate::ooxml::pptx::template;

use super::pres::MutablePresentation;
use super::relmap::RelationshipMapper;

fn uri(partname: &str) -> Result<PackURI> {
    PackURI::new(partname).map_err(OoxmlError::Xml)
}

fn layout_uri(layout: usize) -> Result<PackURI> {
    uri(&format!("/ppt/slideLayouts/slideLayout{}.xml", layout))
}

impl MutablePresentation {
    /// Build the complete OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();

        let pres_uri = uri("/ppt/presentation.xml")?;
        let master_uri = uri("/ppt/slideMasters/slideMaster1.xml")?;
        let theme_uri = uri("/ppt/theme/theme1.xml")?;
        let pres_props_uri = uri("/ppt/presProps.xml")?;
        let view_props_uri = uri("/ppt/viewProps.xml")?;
        let table_styles_uri = uri("/ppt/tableStyles.xml")?;
        let core_uri = uri("/docProps/core.xml")?;
        let app_uri = uri("/docProps/app.xml")?;

        // Presentation part; content is written once slide rIds are known.
        let mut pres_part = BlobPart::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, Vec::new());
        let master_rel_id = pres_part.relate_to(&master_uri, rt::SLIDE_MASTER);
        pres_part.relate_to(&pres_props_uri, rt::PRES_PROPS);
        pres_part.relate_to(&view_props_uri, rt::VIEW_PROPS);
        pres_part.relate_to(&theme_uri, rt::THEME);
        pres_part.relate_to(&table_styles_uri, rt::TABLE_STYLES);

        let mut slide_parts = Vec::with_capacity(self.slides.len());
        let mut chart_parts = Vec::new();
        let mut media_parts = Vec::new();
        let mut slide_rel_ids = Vec::with_capacity(self.slides.len());
        let mut rel_mapper = RelationshipMapper::new();

        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_uri = uri(&format!("/ppt/slides/slide{}.xml", slide_index + 1))?;
            slide_rel_ids.push(pres_part.relate_to(&slide_uri, rt::SLIDE));

            let mut slide_part = BlobPart::new(slide_uri, ct::PML_SLIDE, Vec::new());
            slide_part.relate_to(&layout_uri(slide.layout().layout_number())?, rt::SLIDE_LAYOUT);

            for (image_index, (data, format)) in slide.collect_images().enumerate() {
                let media_uri = uri(&format!(
                    "/ppt/media/image{}.{}",
                    media_parts.len() + 1,
                    format.extension()
                ))?;
                let rel_id = slide_part.relate_to(&media_uri, rt::IMAGE);
                rel_mapper.add_image(slide_index, image_index, rel_id);
                media_parts.push(BlobPart::new(media_uri, format.mime_type(), data.to_vec()));
            }

            for (chart_index, chart) in slide.charts().iter().enumerate() {
                let chart_uri = uri(&format!("/ppt/charts/chart{}.xml", chart_parts.len() + 1))?;
                let rel_id = slide_part.relate_to(&chart_uri, rt::CHART);
                rel_mapper.add_chart(slide_index, chart_index, rel_id);
                chart_parts.push(BlobPart::xml(chart_uri, ct::DML_CHART, chart_to_xml(chart)?));
            }

            slide_parts.push(slide_part);
        }

        for (slide_index, (slide, part)) in self.slides.iter().zip(&mut slide_parts).enumerate() {
            let xml = slide.to_xml_with_rels(slide_index, &rel_mapper)?;
            log::debug!("rendered {} ({} shapes)", part.partname(), slide.shape_count());
            part.set_blob(xml.into_bytes());
        }

        pres_part.set_blob(
            self.generate_presentation_xml_with_rels(&master_rel_id, &slide_rel_ids)?
                .into_bytes(),
        );
        package.add_part(Box::new(pres_part))?;

        let mut master_part =
            BlobPart::xml(master_uri.clone(), ct::PML_SLIDE_MASTER, template::slide_master_xml());
        for layout in 1..=template::LAYOUT_COUNT {
            let layout_uri = layout_uri(layout)?;
            master_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);

            let xml = template::slide_layout_xml(layout)
                .ok_or_else(|| OoxmlError::PartNotFound(layout_uri.to_string()))?;
            let mut layout_part = BlobPart::xml(layout_uri, ct::PML_SLIDE_LAYOUT, xml);
            layout_part.relate_to(&master_uri, rt::SLIDE_MASTER);
            package.add_part(Box::new(layout_part))?;
        }
        master_part.relate_to(&theme_uri, rt::THEME);
        package.add_part(Box::new(master_part))?;

        package.add_part(Box::new(BlobPart::xml(theme_uri, ct::OFC_THEME, template::theme_xml())))?;
        package.add_part(Box::new(BlobPart::xml(
            pres_props_uri,
            ct::PML_PRES_PROPS,
            template::pres_props_xml(),
        )))?;
        package.add_part(Box::new(BlobPart::xml(
            view_props_uri,
            ct::PML_VIEW_PROPS,
            template::view_props_xml(),
        )))?;
        package.add_part(Box::new(BlobPart::xml(
            table_styles_uri,
            ct::PML_TABLE_STYLES,
            template::table_styles_xml(),
        )))?;

        for part in slide_parts.into_iter().chain(chart_parts).chain(media_parts) {
            package.add_part(Box::new(part))?;
        }

        package.add_part(Box::new(BlobPart::xml(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            self.properties.core_xml()?,
        )))?;
        package.add_part(Box::new(BlobPart::xml(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            self.properties.app_xml(self.slides.len())?,
        )))?;

        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        Ok(package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(PackageWriter::to_bytes(&package)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::{Chart, Series};
    use crate::ooxml::opc::PackageReader;
    use crate::ooxml::pptx::writer::SlideLayout;
    use chrono::{TimeZone, Utc};

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    fn sample() -> MutablePresentation {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut pres = MutablePresentation::new(created);
        pres.add_slide(SlideLayout::TitleSlide).set_title("Deck");
        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("Chart");
        slide.add_chart(Chart::clustered_column(Series::new(0)), 0, 0, 10, 10);
        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.add_picture_from_bytes(PNG.to_vec(), 0, 0, 10, 10, None).unwrap();
        slide.add_chart(Chart::pie(Series::new(0)), 0, 0, 10, 10);
        pres
    }

    #[test]
    fn test_package_contains_expected_parts() {
        let bytes = sample().to_bytes().unwrap();
        let reader = PackageReader::from_bytes(&bytes).unwrap();
        for partname in [
            "/ppt/presentation.xml",
            "/ppt/slideMasters/slideMaster1.xml",
            "/ppt/slideLayouts/slideLayout1.xml",
            "/ppt/slideLayouts/slideLayout2.xml",
            "/ppt/theme/theme1.xml",
            "/ppt/slides/slide3.xml",
            "/ppt/charts/chart1.xml",
            "/ppt/charts/chart2.xml",
            "/ppt/media/image1.png",
            "/docProps/core.xml",
            "/docProps/app.xml",
        ] {
            assert!(reader.contains(&PackURI::new(partname).unwrap()), "{partname}");
        }
        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(reader.content_type(&image), Some(ct::PNG));
    }

    #[test]
    fn test_slide_relationships_in_shape_order() {
        let bytes = sample().to_bytes().unwrap();
        let reader = PackageReader::from_bytes(&bytes).unwrap();
        let slide = PackURI::new("/ppt/slides/slide3.xml").unwrap();
        let rels = reader.rels_for(&slide).unwrap();
        let targets: Vec<&str> = rels.iter().map(|r| r.target_ref()).collect();
        assert_eq!(
            targets,
            vec![
                "../slideLayouts/slideLayout2.xml",
                "../media/image1.png",
                "../charts/chart2.xml"
            ]
        );
    }

    #[test]
    fn test_serialization_is_byte_stable() {
        let pres = sample();
        assert_eq!(pres.to_bytes().unwrap(), pres.to_bytes().unwrap());
    }
}
