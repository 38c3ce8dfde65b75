//! Sample receipts, written in the markup accepted by [`super::markup`].
//!
//! Handy for trying a printer without writing a receipt first:
//!
//! ```bash
//! bluberry render --sample cafe --png cafe.png
//! ```

/// A small English café receipt. Renders with the built-in bitmap font.
pub const CAFE: &str = "\
<center><large><b>*** RECEIPT ***
<feed=1>
<center>
Corner Cafe
12 Main Street
Tel 02-1234-5678
<reset>
--------------------------------
Item          Price  Qty  Amount
Americano     3,000    2   6,000
Cafe Latte    4,000    1   4,000
Cake          5,000    1   5,000
--------------------------------
<right>
<b>Subtotal: 15,000
VAT: 1,500
<b>Total: 16,500
<reset>
<feed=1>
<center>Thank you for visiting!
";

/// The same receipt in Korean. Needs a TTF with Hangul coverage
/// (`--font`); the bitmap font draws boxes for these characters.
pub const HANGUL: &str = "\
<center><size=24><b>*** 영수증 ***
<feed=3>
<center><size=16>
매장명: 한국 상점
주소: 서울시 강남구
전화: 02-1234-5678
<reset>
<center><size=14>--------------------------------
<size=14>상품명         단가    수량   금액
<size=14>아메리카노     3,000    2    6,000
<size=14>카페라떼       4,000    1    4,000
<size=14>케이크         5,000    1    5,000
<center><size=14>--------------------------------
<right><size=16><b>
합계: 15,000원
부가세: 1,500원
총액: 16,500원
<reset>
<center><size=16>이용해 주셔서 감사합니다!
";

/// List available sample receipts
pub fn list_samples() -> &'static [&'static str] {
    &["cafe", "hangul"]
}

/// Get sample markup by name
pub fn by_name(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "cafe" => Some(CAFE),
        "hangul" | "korean" => Some(HANGUL),
        _ => None,
    }
}
