use crate::io::{Format, error::Error};
use crate::model::{atom::Atom, types::Element};
use std::io::BufRead;
use std::str::FromStr;

/// Reads a geometry listing of `Symbol x y z` lines.
///
/// A standard XYZ header (atom count followed by a free-form comment line)
/// is accepted but not required. Blank lines and `#` comments are ignored.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Atom>, Error> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        lines.push((i + 1, content));
    }

    let mut body = lines.as_slice();
    let mut expected = None;
    if let Some(pos) = body.iter().position(|(_, l)| !is_skippable(l)) {
        let (_, first) = &body[pos];
        if let Ok(count) = first.trim().parse::<usize>() {
            expected = Some(count);
            // The comment line is taken verbatim, even if blank.
            body = body.get(pos + 2..).unwrap_or(&[]);
        }
    }

    let mut atoms = Vec::new();
    for (ln, line) in body {
        if is_skippable(line) {
            continue;
        }
        atoms.push(parse_atom(line, *ln)?);
    }

    if let Some(count) = expected {
        if count != atoms.len() {
            let last = lines.last().map(|(ln, _)| *ln).unwrap_or(1);
            return Err(Error::parse(
                Format::Xyz,
                last,
                format!("header declares {count} atoms but {} were listed", atoms.len()),
            ));
        }
    }
    Ok(atoms)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_atom(line: &str, line_no: usize) -> Result<Atom, Error> {
    let tokens: Vec<_> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(Error::parse(
            Format::Xyz,
            line_no,
            "atom line must contain a symbol and three coordinates",
        ));
    }
    let element = parse_element(tokens[0]).map_err(|details| Error::parse(Format::Xyz, line_no, details))?;
    let mut position = [0.0; 3];
    for (slot, token) in position.iter_mut().zip(&tokens[1..4]) {
        *slot = token.parse::<f64>().map_err(|_| {
            Error::parse(Format::Xyz, line_no, format!("invalid coordinate '{token}'"))
        })?;
    }
    Ok(Atom::new(element, position))
}

/// Accepts an element symbol or an atomic number, as some programs emit.
fn parse_element(label: &str) -> Result<Element, String> {
    match label.parse::<u8>() {
        Ok(z) => Element::from_atomic_number(z).ok_or_else(|| format!("no element has atomic number {z}")),
        Err(_) => Element::from_str(label).map_err(|e| e.to_string()),
    }
}
