use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Default output path of the sample workbook.
pub const DEFAULT_OUTPUT: &str = "sample_backlog.xlsx";

/// The 13 backlog export headers; column 1 is the incident ID.
pub const HEADERS: [&str; 13] = [
    "ID de la incidencia*+",
    "ID de petición de servicio",
    "Descripción Detallada",
    "Grupo asignado*+",
    "Prioridad*",
    "Estado*",
    "Fecha de notificación+",
    "Fecha de solución",
    "Apellidos+",
    "Nombre+",
    "Solución",
    "Usuario asignado+",
    "Nombre del producto+",
];

fn column_number_to_name(mut column: usize) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn cell_ref(col_1based: usize, row_1based: usize) -> String {
    format!("{}{}", column_number_to_name(col_1based), row_1based)
}

/// Writes a backlog-shaped sample workbook:
///
/// - row 2: regular ID
/// - row 3: no ID
/// - row 4: ID is the text `None`
/// - row 5: whitespace-only ID
/// - row 6: numeric ID `12345`
/// - row 7: ID padded with spaces
///
/// 3 of the 6 data rows are valid.
pub fn write_sample(path: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    for (i, header) in HEADERS.iter().enumerate() {
        sheet
            .get_cell_mut(cell_ref(i + 1, 1).as_str())
            .set_value_string(*header);
    }

    let ids: [Option<&str>; 6] = [
        Some("INC000012345601"),
        None,
        Some("None"),
        Some("   "),
        None,
        Some(" INC000000009999 "),
    ];
    for (i, id) in ids.iter().enumerate() {
        let row = i + 2;
        if let Some(id) = id {
            sheet
                .get_cell_mut(cell_ref(1, row).as_str())
                .set_value_string(*id);
        }
        sheet
            .get_cell_mut(cell_ref(2, row).as_str())
            .set_value_string(format!("REQ{:07}", row));
        sheet
            .get_cell_mut(cell_ref(3, row).as_str())
            .set_value_string("Impresora no imprime");
        sheet
            .get_cell_mut(cell_ref(5, row).as_str())
            .set_value_string("Alta");
        sheet
            .get_cell_mut(cell_ref(6, row).as_str())
            .set_value_string("En curso");
        sheet
            .get_cell_mut(cell_ref(13, row).as_str())
            .set_value_string("Office");
    }

    sheet.get_cell_mut("A6").set_value_number(12345);
    sheet.get_cell_mut("K6").set_value_bool(true);
    sheet.get_cell_mut("H2").set_value_number(2.5);

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .with_context(|| format!("cannot save file: {}", path.display()))?;
    info!(path = %path.display(), "wrote sample workbook");
    Ok(())
}

pub fn run(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<()> {
    let mut args = args.into_iter();
    let _exe = args.next();

    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    write_sample(&output_path)?;
    println!("Wrote {}", output_path.display());
    Ok(())
}
