//! Text render adapter: box-drawn tables styled through `console`.

use anyhow::{bail, Result};
use console::{measure_text_width, pad_str, truncate_str, Alignment, Style};
use tablebuilderlib::{Cell, Grid, Justify, RenderAdapter};

/// Glyph set for one border style.
#[derive(Debug, Clone, Copy)]
struct Glyphs {
    h: char,
    v: char,
    cross: char,
    /// Top rule: left corner, joint, right corner
    top: [char; 3],
    /// Inner rules: left tee, right tee
    side: [char; 2],
    /// Bottom rule: left corner, joint, right corner
    bottom: [char; 3],
    /// Fill of the rule between sections
    section: char,
    /// Column separator before a new section (transposed tables)
    section_v: char,
}

const ASCII: Glyphs = Glyphs {
    h: '-',
    v: '|',
    cross: '+',
    top: ['+', '+', '+'],
    side: ['+', '+'],
    bottom: ['+', '+', '+'],
    section: '=',
    section_v: '#',
};

const LIGHT: Glyphs = Glyphs {
    h: '─',
    v: '│',
    cross: '┼',
    top: ['┌', '┬', '┐'],
    side: ['├', '┤'],
    bottom: ['└', '┴', '┘'],
    section: '═',
    section_v: '║',
};

const HEAVY: Glyphs = Glyphs {
    h: '━',
    v: '┃',
    cross: '╋',
    top: ['┏', '┳', '┓'],
    side: ['┣', '┫'],
    bottom: ['┗', '┻', '┛'],
    section: '═',
    section_v: '║',
};

/// Horizontal rules only.
const MINIMAL: Glyphs = Glyphs {
    h: '─',
    v: ' ',
    cross: '─',
    top: ['─', '─', '─'],
    side: ['─', '─'],
    bottom: ['─', '─', '─'],
    section: '═',
    section_v: '┊',
};

fn glyphs(name: Option<&str>) -> Result<Glyphs> {
    Ok(match name.unwrap_or("light") {
        "ascii" => ASCII,
        "light" => LIGHT,
        "heavy" => HEAVY,
        "minimal" => MINIMAL,
        other => bail!(
            "unknown border style '{}' (expected ascii, light, heavy or minimal)",
            other
        ),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Top,
    Inner,
    Section,
    Bottom,
}

#[derive(Debug)]
enum Line<'a> {
    Cells(Vec<(&'a Cell, Alignment)>),
    Rule(Rule),
}

fn alignment(justify: Justify) -> Alignment {
    match justify {
        Justify::Left => Alignment::Left,
        Justify::Center => Alignment::Center,
        Justify::Right => Alignment::Right,
    }
}

/// Pair each cell of a displayed row with its lane's alignment.
fn aligned<'g>(grid: &'g Grid, cells: Vec<&'g Cell>) -> Vec<(&'g Cell, Alignment)> {
    cells
        .into_iter()
        .zip(&grid.lanes)
        .map(|(cell, lane)| (cell, alignment(lane.justify)))
        .collect()
}

/// Lines plus the separator glyph before each inner column.
struct Layout<'a> {
    lines: Vec<Line<'a>>,
    columns: usize,
    /// `true` where the separator before column `i + 1` marks a section
    section_seps: Vec<bool>,
}

fn layout(grid: &Grid) -> Layout<'_> {
    let header = grid.options.is_header_shown();
    let footer = grid.options.is_footer_shown();
    let show_lines = grid.options.show_lines.unwrap_or(false);
    let boundaries = grid.boundaries();
    let mut lines = Vec::new();

    if !grid.is_transposed() {
        let columns = grid.lanes.len();
        if header {
            lines.push(Line::Cells(aligned(grid, grid.headers())));
            lines.push(Line::Rule(Rule::Inner));
        }
        for (index, row) in grid.body_rows().into_iter().enumerate() {
            if boundaries.contains(&index) {
                lines.push(Line::Rule(Rule::Section));
            } else if show_lines && index > 0 {
                lines.push(Line::Rule(Rule::Inner));
            }
            lines.push(Line::Cells(aligned(grid, row)));
        }
        if footer {
            lines.push(Line::Rule(Rule::Inner));
            lines.push(Line::Cells(aligned(grid, grid.footers())));
        }
        return Layout {
            lines,
            columns,
            section_seps: vec![false; columns.saturating_sub(1)],
        };
    }

    // Transposed: one line per lane, header and footer as the outer columns.
    let lead = usize::from(header);
    let columns = lead + grid.record_count + usize::from(footer);
    let section_seps = (1..columns)
        .map(|col| col >= lead && boundaries.contains(&(col - lead)))
        .collect();
    for (index, lane) in grid.lanes.iter().enumerate() {
        if show_lines && index > 0 {
            lines.push(Line::Rule(Rule::Inner));
        }
        let justify = alignment(lane.justify);
        let mut cells = Vec::with_capacity(columns);
        if header {
            cells.push((&lane.header, Alignment::Left));
        }
        cells.extend(lane.cells.iter().map(|cell| (cell, justify)));
        if footer {
            cells.push((&lane.footer, justify));
        }
        lines.push(Line::Cells(cells));
    }
    Layout {
        lines,
        columns,
        section_seps,
    }
}

/// Draws grids as text tables.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    colors: bool,
}

impl TextRenderer {
    /// Colours follow the terminal's capabilities.
    pub fn new() -> Self {
        Self {
            colors: console::colors_enabled(),
        }
    }

    /// Never emit escape codes.
    pub fn plain() -> Self {
        Self { colors: false }
    }

    fn paint(&self, text: &str, token: &str) -> String {
        if !self.colors || token.trim().is_empty() {
            return text.to_string();
        }
        Style::from_dotted_str(&token.split_whitespace().collect::<Vec<_>>().join("."))
            .force_styling(true)
            .apply_to(text)
            .to_string()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_text(cell: &Cell) -> String {
    cell.text.replace('\n', " ")
}

/// Fit column widths to the `width` / `min_width` options.
fn fit_widths(widths: &mut [usize], overhead: usize, width: Option<usize>, min_width: Option<usize>) {
    let total = |widths: &[usize]| widths.iter().sum::<usize>() + overhead;
    if let Some(width) = width {
        while total(widths) > width {
            match widths.iter_mut().filter(|w| **w > 1).max_by_key(|w| **w) {
                Some(widest) => *widest -= 1,
                None => break,
            }
        }
    }
    let target = width.or(min_width).unwrap_or(0);
    let current = total(widths);
    if current < target {
        if let Some(last) = widths.last_mut() {
            *last += target - current;
        }
    }
}

impl RenderAdapter for TextRenderer {
    type Output = String;
    type Error = anyhow::Error;

    fn render(&self, grid: &Grid) -> Result<String> {
        if let Some(key) = grid.options.extra.keys().next() {
            bail!("unsupported table option '{}'", key);
        }
        let glyphs = glyphs(grid.options.borders.as_deref())?;
        let options = &grid.options;
        let padding = options.padding.unwrap_or(1);
        let edge = options.show_edge.unwrap_or(true);
        let border_style = options.border_style.as_deref().unwrap_or("");

        let layout = layout(grid);
        let mut widths = vec![0usize; layout.columns];
        for line in &layout.lines {
            if let Line::Cells(cells) = line {
                for (width, (cell, _)) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(measure_text_width(&cell_text(cell)));
                }
            }
        }
        let overhead = layout.columns * padding * 2
            + layout.columns.saturating_sub(1)
            + if edge { 2 } else { 0 };
        fit_widths(&mut widths, overhead, options.width, options.min_width);
        let total_width = widths.iter().sum::<usize>() + overhead;

        let border = |s: String| self.paint(&s, border_style);
        let pad = " ".repeat(padding);
        let mut out: Vec<String> = Vec::new();

        let banner = |text: &Option<String>, style: &Option<String>| {
            text.as_ref().map(|text| {
                let width = total_width.max(measure_text_width(text));
                let centered = pad_str(text, width, Alignment::Center, None);
                self.paint(centered.trim_end(), style.as_deref().unwrap_or(""))
            })
        };

        if let Some(title) = banner(&options.title, &options.title_style) {
            out.push(title);
        }

        if layout.columns > 0 {
            let rule = |kind: Rule| -> String {
                let (left, joint, right, fill) = match kind {
                    Rule::Top => (glyphs.top[0], glyphs.top[1], glyphs.top[2], glyphs.h),
                    Rule::Inner => (glyphs.side[0], glyphs.cross, glyphs.side[1], glyphs.h),
                    Rule::Section => (glyphs.side[0], glyphs.cross, glyphs.side[1], glyphs.section),
                    Rule::Bottom => (
                        glyphs.bottom[0],
                        glyphs.bottom[1],
                        glyphs.bottom[2],
                        glyphs.h,
                    ),
                };
                let segments: Vec<String> = widths
                    .iter()
                    .map(|w| fill.to_string().repeat(w + padding * 2))
                    .collect();
                let mut line = segments.join(&joint.to_string());
                if edge {
                    line = format!("{}{}{}", left, line, right);
                }
                line
            };

            if edge {
                out.push(border(rule(Rule::Top)));
            }
            for line in &layout.lines {
                match line {
                    Line::Rule(kind) => out.push(border(rule(*kind))),
                    Line::Cells(cells) => {
                        let mut text = String::new();
                        if edge {
                            text.push_str(&border(glyphs.v.to_string()));
                        }
                        for (col, ((cell, align), width)) in cells.iter().zip(&widths).enumerate() {
                            if col > 0 {
                                let sep = if layout.section_seps[col - 1] {
                                    glyphs.section_v
                                } else {
                                    glyphs.v
                                };
                                text.push_str(&border(sep.to_string()));
                            }
                            let plain = cell_text(cell);
                            let fitted = truncate_str(&plain, *width, "…");
                            let painted = self.paint(&fitted, &cell.style);
                            text.push_str(&pad);
                            text.push_str(&pad_str(&painted, *width, *align, None));
                            text.push_str(&pad);
                        }
                        if edge {
                            text.push_str(&border(glyphs.v.to_string()));
                        }
                        out.push(text.trim_end().to_string());
                    }
                }
            }
            if edge {
                out.push(border(rule(Rule::Bottom)));
            }
        }

        if let Some(caption) = banner(&options.caption, &options.caption_style) {
            out.push(caption);
        }

        let mut text = out.join("\n");
        text.push('\n');
        Ok(text)
    }
}
