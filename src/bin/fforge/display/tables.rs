use std::collections::BTreeMap;
use std::io::{self, Write};

use fermi_forge::hamiltonians::MolecularData;
use fermi_forge::{Action, FermionOperator, QubitOperator, SymbolicOperator, count_qubits, is_hermitian};

use crate::util::text::{grouped, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Rows shared by every operator summary.
fn operator_rows<A: Action>(operator: &SymbolicOperator<A>) -> Vec<(&'static str, String)> {
    let constant = operator.constant();
    vec![
        ("Terms", grouped(operator.len())),
        ("Modes", grouped(count_qubits(operator))),
        ("Max |coef|", format!("{:.6}", operator.max_coefficient())),
        ("Constant", format!("{:.6}", constant.re)),
    ]
}

pub fn print_fermion_summary(operator: &FermionOperator) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = operator_rows(operator);
    let max_order = operator.terms().map(|(term, _)| term.len()).max().unwrap_or(0);
    rows.push(("Max Order", format!("{max_order}-body ops")));
    rows.push((
        "Hermitian",
        if is_hermitian(operator) { "yes" } else { "no" }.to_string(),
    ));

    print_kv_table(&mut out, "Fermion Operator", &rows);
}

pub fn print_qubit_summary(operator: &QubitOperator) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = operator_rows(operator);
    rows[1].0 = "Qubits";
    print_kv_table(&mut out, "Qubit Operator", &rows);

    let mut weights: BTreeMap<usize, usize> = BTreeMap::new();
    for (term, _) in operator.terms() {
        *weights.entry(term.len()).or_insert(0) += 1;
    }
    let data: Vec<_> = weights
        .into_iter()
        .map(|(weight, count)| (format!("weight {weight}"), count))
        .collect();
    print_distribution_table(&mut out, "Pauli Weight Distribution", "Weight", &data, operator.len());
}

pub fn print_molecule_summary(molecule: &MolecularData) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = vec![
        ("Name", molecule.name.clone()),
        ("Atoms", grouped(molecule.n_atoms)),
        ("Electrons", grouped(molecule.n_electrons as usize)),
        ("Multiplicity", molecule.multiplicity.to_string()),
        ("Charge", molecule.charge.to_string()),
        ("Repulsion (Ha)", format!("{:.6}", molecule.nuclear_repulsion)),
    ];
    print_kv_table(&mut out, "Molecule Summary", &rows);

    let mut element_counts: BTreeMap<u8, (String, usize)> = BTreeMap::new();
    for element in &molecule.atoms {
        element_counts
            .entry(element.atomic_number())
            .or_insert_with(|| (element.symbol().to_string(), 0))
            .1 += 1;
    }
    let mut sorted: Vec<_> = element_counts.into_values().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    print_distribution_table(&mut out, "Element Distribution", "Element", &sorted, molecule.n_atoms);
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    label: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        label, "Count", "Distribution"
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data.iter().take(15) {
        let pct = if total == 0 {
            0.0
        } else {
            (*count as f64 / total as f64) * 100.0
        };
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            truncate(name, name_w),
            count,
            dist_cell
        );
    }

    if data.len() > 15 {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            "...",
            "...",
            format!("({} more rows)", data.len() - 15)
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
