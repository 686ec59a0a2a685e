//! 商品批量导入
//!
//! 每条记录单独插入、单独提交，某条失败不会中断后续记录，最终只返回成功条数。

use tracing::{info, warn};

use super::model::Product;
use super::service::ProductService;

/// 批量导入中的一行输入：解析失败的行同样计入失败数
pub type ImportRow = Result<Product, String>;

/// 逐条导入商品，返回成功保存的条数
pub async fn import_products<I>(service: &ProductService, rows: I) -> usize
where
    I: IntoIterator<Item = ImportRow>,
{
    let mut total = 0usize;
    let mut saved = 0usize;

    for (index, row) in rows.into_iter().enumerate() {
        total += 1;
        let product = match row {
            Ok(product) => product,
            Err(reason) => {
                warn!(index, %reason, "跳过无法解析的记录");
                continue;
            }
        };

        match service.insert_product(&product).await {
            Ok(rows) if rows > 0 => saved += 1,
            Ok(_) => warn!(index, "保存失败: 未影响任何行"),
            Err(e) => warn!(index, error = %e, "保存失败"),
        }
    }

    info!(total, saved, "批量导入完成");
    saved
}

/// 列位置：表头行按列名定位，无表头时依次为 `name,image,price,seller`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    width: usize,
    name: Option<usize>,
    image: Option<usize>,
    price: Option<usize>,
    seller: Option<usize>,
}

impl Columns {
    const POSITIONAL: Columns = Columns {
        width: 4,
        name: Some(0),
        image: Some(1),
        price: Some(2),
        seller: Some(3),
    };

    /// 含 `name` 列的行视为表头，其余未知列（如 `sold`）忽略
    fn from_header(record: &csv::StringRecord) -> Option<Self> {
        let position = |key: &str| record.iter().position(|h| h.eq_ignore_ascii_case(key));
        Some(Self {
            width: record.len(),
            name: Some(position("name")?),
            image: position("image"),
            price: position("price"),
            seller: position("seller"),
        })
    }
}

/// 解析 CSV 文本
///
/// 支持浏览器插件导出的格式：UTF-8 BOM、双引号包裹的字段、CRLF 换行。
/// 首行含 `name` 列时按表头列名取值，否则按 `name,image,price,seller` 顺序取值；
/// 空行忽略，图片列中多张图片用 `|` 分隔。
pub fn parse_csv(text: &str) -> Vec<ImportRow> {
    let text = strip_bom(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut layout: Option<Columns> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                rows.push(Err(format!("CSV 格式错误: {}", e)));
                continue;
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }

        let columns = match layout {
            Some(columns) => columns,
            None => {
                if let Some(header) = Columns::from_header(&record) {
                    layout = Some(header);
                    continue;
                }
                layout = Some(Columns::POSITIONAL);
                Columns::POSITIONAL
            }
        };

        rows.push(parse_record(&record, &columns));
    }

    rows
}

/// 去掉 Excel/浏览器导出时附带的 UTF-8 BOM
pub fn strip_bom(text: &str) -> &str {
    text.trim_start_matches('\u{feff}')
}

fn parse_record(record: &csv::StringRecord, columns: &Columns) -> ImportRow {
    if record.len() != columns.width {
        return Err(format!("列数应为 {}，实际为 {}", columns.width, record.len()));
    }
    let field = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

    let price = field(columns.price);
    let price = if price.is_empty() {
        None
    } else {
        Some(
            price
                .parse::<f64>()
                .map_err(|_| format!("价格格式错误: {}", price))?,
        )
    };

    Ok(Product {
        id: None,
        name: optional(field(columns.name)),
        image: field(columns.image)
            .split('|')
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(String::from)
            .collect(),
        price,
        seller: optional(field(columns.seller)),
    })
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_header() {
        let rows = parse_csv("name,image,price,seller\n鼠标,a.jpg|b.jpg,9.5,shop-a\n");
        assert_eq!(rows.len(), 1);
        let product = rows[0].as_ref().unwrap();
        assert_eq!(product.name.as_deref(), Some("鼠标"));
        assert_eq!(product.image, vec!["a.jpg", "b.jpg"]);
        assert_eq!(product.price, Some(9.5));
        assert_eq!(product.seller.as_deref(), Some("shop-a"));
    }

    #[test]
    fn test_parse_csv_without_header_skips_blank_lines() {
        let rows = parse_csv("键盘,,,\n\n显示器,c.jpg,199,shop-b");
        assert_eq!(rows.len(), 2);
        let keyboard = rows[0].as_ref().unwrap();
        assert!(keyboard.image.is_empty());
        assert_eq!(keyboard.price, None);
        assert_eq!(keyboard.seller, None);
    }

    #[test]
    fn test_parse_exported_csv_with_bom_quotes_and_crlf() {
        let text = "\u{FEFF}\"name\",\"image\",\"price\",\"seller\"\r\n\
                    \"Shoes, red\",\"a.jpg\",\"9.5\",\"shop-a\"\r\n\
                    \"Hat \"\"XL\"\"\",\"b.jpg\",\"3\",\"shop-b\"";
        let rows = parse_csv(text);
        assert_eq!(rows.len(), 2);

        let shoes = rows[0].as_ref().unwrap();
        assert_eq!(shoes.name.as_deref(), Some("Shoes, red"));
        assert_eq!(shoes.image, vec!["a.jpg"]);
        assert_eq!(shoes.price, Some(9.5));

        let hat = rows[1].as_ref().unwrap();
        assert_eq!(hat.name.as_deref(), Some("Hat \"XL\""));
        assert_eq!(hat.seller.as_deref(), Some("shop-b"));
    }

    #[test]
    fn test_header_columns_are_mapped_by_name() {
        let rows = parse_csv("name,price,image,sold,seller\n鼠标,12,a.jpg,100+,shop-a");
        assert_eq!(rows.len(), 1);
        let product = rows[0].as_ref().unwrap();
        assert_eq!(product.price, Some(12.0));
        assert_eq!(product.image, vec!["a.jpg"]);
        assert_eq!(product.seller.as_deref(), Some("shop-a"));
    }

    #[test]
    fn test_bad_rows_are_reported() {
        let rows = parse_csv("鼠标,a.jpg,abc,shop-a\n只有两列,x");
        assert!(rows[0].is_err());
        assert!(rows[1].is_err());
    }
}
