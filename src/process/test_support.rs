//! In-memory fixtures shared by the unit tests and, through `#[path]`, by
//! the integration tests under `tests/`.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::CompressionMethod;

/// Header of a disaggregated futures-only report, trimmed to a handful of
/// extra columns around the ones we keep.
pub const HEADER: &str = "Market_and_Exchange_Names,As_of_Date_In_Form_YYMMDD,As_of_Date_Form_YYYY-MM-DD,CFTC_Contract_Market_Code,CFTC_Market_Code,CFTC_Region_Code,CFTC_Commodity_Code,Open_Interest_All,Prod_Merc_Positions_Long_All,Prod_Merc_Positions_Short_All,Swap_Positions_Long_All,Swap__Positions_Short_All,Swap__Positions_Spread_All,M_Money_Positions_Long_All,M_Money_Positions_Short_All,M_Money_Positions_Spread_All,Other_Rept_Positions_Long_All,Other_Rept_Positions_Short_All,Other_Rept_Positions_Spread_All";

pub const GOLD_ROW: &str = "\"GOLD - COMMODITY EXCHANGE INC.  \",240102,2024-01-02,088691  ,CMX   ,1,088  ,12345,100,200,300,400,50,600,700,80,900,1000,11";
pub const GOLD_ROW_LATER: &str = "\"GOLD - COMMODITY EXCHANGE INC.  \",240109,2024-01-09,088691  ,CMX   ,1,088  ,12400,110,210,310,410,51,610,710,81,910,1010,12";
pub const SILVER_ROW: &str = "SILVER - COMMODITY EXCHANGE INC.,240102,2024-01-02, 084691 ,CMX,1,084,54321,1,2,3,4,5,6,7,8,9,10,11";
pub const COPPER_ROW: &str = "COPPER- #1 - COMMODITY EXCHANGE INC.,231226,2023-12-26,085692,CMX,1,085,222,10,20,30,40,5,60,70,8,-90,100,1";
pub const PLATINUM_ROW: &str = "PLATINUM - NEW YORK MERCANTILE EXCHANGE,240102,2024-01-02,076651,NYME,1,076,80000,1,2,3,4,5,6,7,8,9,10,11";

pub fn report(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}

/// Build a ZIP holding `entries` (name, contents) in order.
pub fn zip_entries(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, contents) in entries {
            zip.start_file(*name, options).expect("start zip entry");
            zip.write_all(contents).expect("write zip entry");
        }
        zip.finish().expect("finish zip");
    }
    buf
}

pub fn report_zip(rows: &[&str]) -> Vec<u8> {
    zip_entries(&[("f_year.txt", report(rows).as_bytes())])
}
