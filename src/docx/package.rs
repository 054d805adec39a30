//! Static OPC parts and zip assembly for the DOCX container.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::style::cm_to_twips;

pub(super) const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#;

pub(super) const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub(super) const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#;

/// Document defaults (Times New Roman 12pt, 1.5 line spacing) plus the five
/// heading tiers from the shared rule table, sizes in half-points.
pub(super) fn styles_xml() -> String {
    let heading = |id: u8, size_hp: u32, center: bool| {
        let jc = if center { r#"<w:jc w:val="center"/>"# } else { "" };
        let caps = if center { "<w:caps/>" } else { "" };
        format!(
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{id}">"#,
                r#"<w:name w:val="heading {id}"/>"#,
                r#"<w:basedOn w:val="Normal"/>"#,
                r#"<w:pPr><w:spacing w:before="240" w:after="120"/>{jc}<w:outlineLvl w:val="{lvl}"/></w:pPr>"#,
                r#"<w:rPr><w:b/>{caps}<w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr>"#,
                r#"</w:style>"#
            ),
            id = id,
            jc = jc,
            caps = caps,
            lvl = id - 1,
            sz = size_hp,
        )
    };

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/>"#,
            r#"<w:sz w:val="24"/><w:szCs w:val="24"/>"#,
            r#"</w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr><w:spacing w:line="360" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
            r#"</w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
            "{h1}{h2}{h3}{h4}{h5}",
            r#"</w:styles>"#
        ),
        h1 = heading(1, 40, true),
        h2 = heading(2, 32, false),
        h3 = heading(3, 28, false),
        h4 = heading(4, 24, false),
        h5 = heading(5, 24, false),
    )
}

/// Two list definitions: numId 1 bulleted, numId 2 decimal.
pub(super) fn numbering_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:abstractNum w:abstractNumId="0">"#,
            r#"<w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/>"#,
            r#"<w:pPr><w:ind w:left="{ind}" w:hanging="360"/></w:pPr></w:lvl>"#,
            r#"</w:abstractNum>"#,
            r#"<w:abstractNum w:abstractNumId="1">"#,
            r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/>"#,
            r#"<w:pPr><w:ind w:left="{ind}" w:hanging="360"/></w:pPr></w:lvl>"#,
            r#"</w:abstractNum>"#,
            r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
            r#"<w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>"#,
            r#"</w:numbering>"#
        ),
        ind = cm_to_twips(0.75) + 360,
    )
}

/// Zip the parts into the final artifact, fully in memory: a failed export
/// never leaves a truncated file behind.
pub(super) fn assemble(document_xml: &str) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
        ("word/document.xml", document_xml.to_string()),
        ("word/styles.xml", styles_xml()),
        ("word/numbering.xml", numbering_xml()),
    ];

    for (name, data) in parts {
        zip.start_file(name, options)?;
        zip.write_all(data.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
