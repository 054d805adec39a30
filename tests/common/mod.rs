//! Shared builders for integration tests.

#![allow(dead_code)]

use abntdoc::model::{Block, BlockBody, CoverData, TableData};

pub fn block(id: &str, body: BlockBody) -> Block {
    Block {
        id: id.into(),
        body,
    }
}

pub fn title(id: &str, text: &str, level: u8) -> Block {
    block(
        id,
        BlockBody::Title {
            content: text.into(),
            level: Some(level),
        },
    )
}

pub fn paragraph(id: &str, text: &str) -> Block {
    block(
        id,
        BlockBody::Paragraph {
            content: text.into(),
        },
    )
}

pub fn page_break(id: &str) -> Block {
    block(id, BlockBody::PageBreak {})
}

pub fn cover(id: &str) -> Block {
    block(
        id,
        BlockBody::Cover {
            cover_data: Some(CoverData {
                title: "Análise de Sistemas Distribuídos".into(),
                subtitle: Some("Um estudo de caso".into()),
                authors: vec!["Maria Souza".into(), "João Lima".into()],
                institution: "Universidade Federal de Minas Gerais".into(),
                city: "Belo Horizonte".into(),
                year: "2026".into(),
            }),
        },
    )
}

pub fn table(id: &str) -> Block {
    block(
        id,
        BlockBody::Table {
            table_data: Some(TableData {
                headers: vec!["Ano".into(), "Valor".into()],
                rows: vec![
                    vec!["2024".into(), "10".into()],
                    vec!["2025".into(), "12".into()],
                ],
            }),
        },
    )
}

/// A small but representative document: cover, toc, sections, list, table,
/// quote, keywords, references.
pub fn sample_document() -> Vec<Block> {
    vec![
        cover("cover"),
        block("toc", BlockBody::Toc {}),
        block(
            "abs",
            BlockBody::Abstract {
                content: "Este trabalho analisa a consistência de réplicas.".into(),
            },
        ),
        block(
            "kw",
            BlockBody::Keywords {
                keywords: vec!["réplicas".into(), "consistência".into()],
            },
        ),
        title("t1", "Introdução", 1),
        paragraph("p1", &"A consistência eventual tolera janelas de divergência. ".repeat(20)),
        block(
            "q1",
            BlockBody::Quote {
                content: "Citação longa com mais de três linhas recuada a quatro centímetros."
                    .into(),
            },
        ),
        title("t2", "Método", 2),
        block(
            "l1",
            BlockBody::List {
                list_items: vec!["coleta".into(), "análise".into()],
            },
        ),
        table("tab1"),
        block(
            "fn1",
            BlockBody::Footnote {
                content: "Dados coletados em 2025.".into(),
                footnote_number: Some(1),
            },
        ),
        block(
            "refs",
            BlockBody::References {
                references: vec![
                    "SOUZA, M. Sistemas distribuídos. São Paulo: Editora X, 2024.".into(),
                ],
            },
        ),
    ]
}
