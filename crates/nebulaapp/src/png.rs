//! Checklist image export.
//!
//! Renders a [`Checklist`] into an RGB PNG: one header line per set with its
//! owned/cap copies, one line per card with number, name, owned/cap and a
//! progress bar. Text uses a built-in 3x5 pixel font scaled up, so the output
//! has no font dependencies. The image is a visual artifact only; nothing ever
//! reads it back.
//!
//! PNG framing is done by hand: scanlines are zlib-compressed with `flate2`
//! and every chunk is sealed with `flate2`'s CRC-32.

use crate::checklist::{Checklist, SetGroup};
use crate::error::{NebulaError, Result};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use std::io::Write;

const SCALE: usize = 2;
const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const CHAR_W: usize = (GLYPH_W + 1) * SCALE;
const LINE_H: usize = (GLYPH_H + 3) * SCALE;
const MARGIN: usize = 16;
const GAP: usize = 16;

const NUMBER_CHARS: usize = 12;
const NAME_CHARS: usize = 40;
const COUNT_CHARS: usize = 5;
const BAR_W: usize = 100;

pub const IMAGE_WIDTH: usize =
    MARGIN * 2 + (NUMBER_CHARS + NAME_CHARS + COUNT_CHARS) * CHAR_W + GAP * 3 + BAR_W;

type Rgb = [u8; 3];

const BACKGROUND: Rgb = [250, 250, 252];
const TEXT: Rgb = [33, 33, 40];
const MUTED: Rgb = [130, 130, 140];
const HEADER: Rgb = [63, 81, 181];
const BAR_EMPTY: Rgb = [224, 224, 230];
const BAR_PARTIAL: Rgb = [100, 149, 237];
const BAR_FULL: Rgb = [76, 175, 80];

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn glyph(c: char) -> [u8; GLYPH_H] {
    match c.to_ascii_uppercase() {
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '&' => [0b010, 0b101, 0b010, 0b101, 0b011],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            pixels.extend_from_slice(&BACKGROUND);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                let i = (row * self.width + col) * 3;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    /// Draws at most `max_chars` characters; longer text is cut with `..`.
    fn text(&mut self, x: usize, y: usize, text: &str, max_chars: usize, color: Rgb) {
        let chars: Vec<char> = text.chars().collect();
        let shown: Vec<char> = if chars.len() > max_chars && max_chars >= 2 {
            chars[..max_chars - 2]
                .iter()
                .copied()
                .chain("..".chars())
                .collect()
        } else {
            chars.into_iter().take(max_chars).collect()
        };
        for (i, c) in shown.into_iter().enumerate() {
            let gx = x + i * CHAR_W;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        self.fill_rect(gx + col * SCALE, y + row * SCALE, SCALE, SCALE, color);
                    }
                }
            }
        }
    }

    fn bar(&mut self, x: usize, y: usize, owned: u64, cap: u64) {
        let h = GLYPH_H * SCALE;
        self.fill_rect(x, y, BAR_W, h, BAR_EMPTY);
        if cap == 0 || owned == 0 {
            return;
        }
        let filled = ((owned.min(cap) as usize) * BAR_W / cap as usize).max(1);
        let color = if owned >= cap { BAR_FULL } else { BAR_PARTIAL };
        self.fill_rect(x, y, filled, h, color);
    }
}

fn line_count(checklist: &Checklist) -> usize {
    // title + blank, then header + entries + blank per set
    let body: usize = checklist
        .groups
        .iter()
        .map(|g| g.entries.len() + 2)
        .sum();
    2 + body.max(1)
}

fn draw_group(canvas: &mut Canvas, group: &SetGroup, mut y: usize) -> usize {
    let count_x = MARGIN + (NUMBER_CHARS + NAME_CHARS) * CHAR_W + GAP * 2;
    let bar_x = count_x + COUNT_CHARS * CHAR_W + GAP;

    let header = format!(
        "{} ({}/{} cards)",
        group.label, group.owned_cards, group.card_count
    );
    canvas.text(MARGIN, y, &header, NUMBER_CHARS + NAME_CHARS, HEADER);
    canvas.text(
        count_x,
        y,
        &format!("{}/{}", group.owned_copies, group.max_copies),
        COUNT_CHARS + 6,
        HEADER,
    );
    y += LINE_H;

    for entry in &group.entries {
        let color = if entry.owned > 0 { TEXT } else { MUTED };
        canvas.text(MARGIN, y, &entry.number, NUMBER_CHARS, color);
        canvas.text(
            MARGIN + NUMBER_CHARS * CHAR_W + GAP,
            y,
            &entry.name,
            NAME_CHARS,
            color,
        );
        canvas.text(
            count_x,
            y,
            &format!("{}/{}", entry.owned, entry.cap),
            COUNT_CHARS,
            color,
        );
        canvas.bar(bar_x, y, u64::from(entry.owned), u64::from(entry.cap));
        y += LINE_H;
    }
    y + LINE_H
}

fn render(checklist: &Checklist) -> Result<Canvas> {
    let height = line_count(checklist)
        .checked_mul(LINE_H)
        .and_then(|h| h.checked_add(MARGIN * 2))
        .ok_or_else(|| NebulaError::Image("checklist is too long to render".to_string()))?;
    png_u32(height, "image height")?;
    let mut canvas = Canvas::new(IMAGE_WIDTH, height);

    let owned: u64 = checklist.groups.iter().map(|g| g.owned_copies).sum();
    let max: u64 = checklist.groups.iter().map(|g| g.max_copies).sum();
    canvas.text(
        MARGIN,
        MARGIN,
        &format!("Nebula collection: {owned}/{max} copies"),
        usize::MAX,
        TEXT,
    );

    let mut y = MARGIN + LINE_H * 2;
    if checklist.is_empty() {
        canvas.text(MARGIN, y, "No cards available to track.", usize::MAX, MUTED);
        return Ok(canvas);
    }
    for group in &checklist.groups {
        y = draw_group(&mut canvas, group, y);
    }
    Ok(canvas)
}

fn png_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| NebulaError::Image(format!("{what} of {value} does not fit in a PNG")))
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<()> {
    out.extend_from_slice(&png_u32(data.len(), "chunk length")?.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
    Ok(())
}

fn encode(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&png_u32(canvas.width, "image width")?.to_be_bytes());
    ihdr.extend_from_slice(&png_u32(canvas.height, "image height")?.to_be_bytes());
    // 8-bit depth, truecolor, deflate, no filter method, no interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for row in canvas.pixels.chunks(canvas.width * 3) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    let data = encoder.finish()?;
    write_chunk(&mut out, b"IDAT", &data)?;
    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

pub fn export_checklist_png(checklist: &Checklist) -> Result<Vec<u8>> {
    let canvas = render(checklist)?;
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        sets = checklist.groups.len(),
        "rendered checklist image"
    );
    encode(&canvas)
}
