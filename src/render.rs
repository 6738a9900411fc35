use crate::cube::{Color, Cube};
use crossterm::style::{self, Stylize};
use std::fmt::{self, Write};

// Unfolded net, one row of facelet indices per sticker row. The Y face sits
// above and below the middle strip X Z X Z.
const TOP: [[usize; 2]; 2] = [[16, 17], [18, 19]];
const MIDDLE: [[usize; 8]; 2] = [
    [12, 13, 0, 1, 4, 5, 8, 9],
    [14, 15, 2, 3, 6, 7, 10, 11],
];
const BOTTOM: [[usize; 2]; 2] = [[20, 21], [22, 23]];
const MIDDLE_LABELS: [char; 4] = ['X', 'Z', 'X', 'Z'];

fn background(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
        Color::Red => style::Color::Red,
        Color::Blue => style::Color::Blue,
        Color::Green => style::Color::Green,
        Color::Orange => style::Color::Rgb {
            r: 255,
            g: 140,
            b: 0,
        },
    }
}

fn write_side(
    out: &mut impl Write,
    cube: &Cube,
    rows: &[[usize; 2]; 2],
    sticker: &impl Fn(Color) -> String,
) -> fmt::Result {
    let f = cube.facelets();
    writeln!(out, "        | {}   {} |", sticker(f[rows[0][0]]), sticker(f[rows[0][1]]))?;
    writeln!(out, "        |   Y   |")?;
    writeln!(out, "        | {}   {} |", sticker(f[rows[1][0]]), sticker(f[rows[1][1]]))
}

fn write_net(
    out: &mut impl Write,
    cube: &Cube,
    sticker: impl Fn(Color) -> String,
) -> fmt::Result {
    let f = cube.facelets();
    writeln!(out, "         -------")?;
    write_side(out, cube, &TOP, &sticker)?;
    writeln!(out, " ------- ------- ------- -------")?;
    for (i, row) in MIDDLE.iter().enumerate() {
        write!(out, "|")?;
        for pair in row.chunks_exact(2) {
            write!(out, " {}   {} |", sticker(f[pair[0]]), sticker(f[pair[1]]))?;
        }
        writeln!(out)?;
        if i == 0 {
            write!(out, "|")?;
            for label in MIDDLE_LABELS {
                write!(out, "   {label}   |")?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, " ------- ------- ------- -------")?;
    write_side(out, cube, &BOTTOM, &sticker)?;
    writeln!(out, "         -------")
}

/// The unfolded net with each sticker drawn on its color's background.
pub fn colored_net(cube: &Cube) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_net(&mut out, cube, |c| {
        style::style(c.as_char())
            .with(style::Color::Black)
            .on(background(c))
            .to_string()
    });
    out
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_net(f, self, |c| c.as_char().to_string())
    }
}
