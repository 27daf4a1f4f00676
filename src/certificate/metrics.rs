use crate::certificate::layout::FontFamily;

/// Breite eines Textes in PDF-Punkten
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: FontFamily, size: f32) -> f32;
}

/// Zeichenbreiten aus den Adobe Core Font Metrics (AFM), WinAnsi-kodiert
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl TextMeasure for StandardFontMetrics {
    fn text_width(&self, text: &str, font: FontFamily, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| glyph_width(font, c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

// Breiten für die Zeichen 0x20..=0x7E, in 1/1000 em
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const COURIER_WIDTH: u16 = 600;

/// Latin-1-Buchstaben ohne ASCII-Grundform; Breiten in [`extra_widths`]
const EXTRA_LETTERS: [char; 7] = ['Æ', 'æ', 'ß', 'Ð', 'ð', 'Þ', 'þ'];

fn extra_widths(font: FontFamily) -> [u16; 7] {
    match font {
        FontFamily::Helvetica | FontFamily::HelveticaOblique => {
            [1000, 889, 611, 722, 556, 667, 556]
        }
        FontFamily::HelveticaBold => [1000, 889, 611, 722, 611, 667, 611],
        FontFamily::TimesRoman => [889, 667, 500, 722, 500, 556, 500],
        FontFamily::TimesBold => [1000, 722, 556, 722, 500, 611, 556],
        FontFamily::TimesItalic => [889, 667, 500, 722, 500, 611, 500],
        FontFamily::Courier => [COURIER_WIDTH; 7],
    }
}

fn glyph_width(font: FontFamily, c: char) -> u16 {
    let table = match font {
        FontFamily::Helvetica | FontFamily::HelveticaOblique => &HELVETICA,
        FontFamily::HelveticaBold => &HELVETICA_BOLD,
        FontFamily::TimesRoman => &TIMES_ROMAN,
        FontFamily::TimesBold => &TIMES_BOLD,
        FontFamily::TimesItalic => &TIMES_ITALIC,
        FontFamily::Courier => return COURIER_WIDTH,
    };

    if let Some(i) = EXTRA_LETTERS.iter().position(|&e| e == c) {
        return extra_widths(font)[i];
    }
    table[(fold_to_ascii(c) as usize) - 0x20]
}

/// Akzentbuchstaben haben in den Core-Fonts dieselbe Breite wie der Grundbuchstabe.
/// Nicht abbildbare Zeichen werden als `?` gemessen (und so auch kodiert).
fn fold_to_ascii(c: char) -> char {
    match c {
        ' '..='~' => c,
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2013}' | '\u{2014}' => '-',
        '\u{00A0}' => ' ',
        _ => '?',
    }
}

/// Kodiert Text für einen Type1-Font mit `/WinAnsiEncoding`.
/// Gezeichnet wird nur, was auch vermessen werden kann; alles andere wird `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{00A0}'..='\u{00FF}' if EXTRA_LETTERS.contains(&c) || fold_to_ascii(c) != '?' => {
            c as u32 as u8
        }
        _ => b'?',
    }
}
