//! Layouts of the formats shipped with the crate, in catalog order.
//!
//! Positions count from the first transmitted bit. Parity bits are listed in
//! the order they are computed; later parity bits may cover earlier ones.

use crate::{
    field::{CardField, Field, FixedBit, ParityBit},
    format::Layout,
    fragment::Fragment,
};

fn layout(
    name: &str,
    description: &str,
    bit_len: usize,
    fields: Vec<Field>,
    parity: Vec<ParityBit>,
) -> Layout {
    Layout {
        name: name.to_string(),
        description: description.to_string(),
        bit_len,
        fields,
        parity,
        fixed: vec![],
    }
}

fn fc(offset_bits: usize, len_bits: usize) -> Field {
    Field::linear(CardField::FacilityCode, offset_bits, len_bits)
}

fn cn(offset_bits: usize, len_bits: usize) -> Field {
    Field::linear(CardField::CardNumber, offset_bits, len_bits)
}

fn issue(offset_bits: usize, len_bits: usize) -> Field {
    Field::linear(CardField::IssueLevel, offset_bits, len_bits)
}

fn oem(offset_bits: usize, len_bits: usize) -> Field {
    Field::linear(CardField::OemCode, offset_bits, len_bits)
}

fn span(offset_bits: usize, len_bits: usize) -> Vec<Fragment> {
    vec![Fragment::new(offset_bits, len_bits)]
}

/// Two bits out of every three, starting at `start` and stopping before `end`.
/// Used by the HID Corporate 1000 parity scheme.
fn pairs(start: usize, end: usize) -> Vec<Fragment> {
    (start..end)
        .step_by(3)
        .map(|offset| Fragment::new(offset, 2.min(end - offset)))
        .collect()
}

pub fn layouts() -> Vec<Layout> {
    let mut kastle = layout(
        "Kastle",
        "Kastle 32-bit",
        32,
        vec![issue(2, 5), fc(7, 8), cn(15, 16)],
        vec![ParityBit::even(0, span(1, 16)), ParityBit::odd(31, span(14, 17))],
    );
    kastle.fixed.push(FixedBit {
        position: 1,
        value: true,
    });

    vec![
        layout(
            "H10301",
            "HID H10301 26-bit",
            26,
            vec![fc(1, 8), cn(9, 16)],
            vec![ParityBit::even(0, span(1, 12)), ParityBit::odd(25, span(13, 12))],
        ),
        layout(
            "ind26",
            "Indala 26-bit",
            26,
            vec![fc(1, 12), cn(13, 12)],
            vec![ParityBit::even(0, span(1, 12)), ParityBit::odd(25, span(13, 12))],
        ),
        layout(
            "ATSW30",
            "ATS Wiegand 30-bit",
            30,
            vec![fc(1, 12), cn(13, 16)],
            vec![ParityBit::even(0, span(1, 12)), ParityBit::odd(29, span(13, 16))],
        ),
        layout("ADT31", "HID ADT 31-bit", 31, vec![fc(1, 4), cn(5, 23)], vec![]),
        layout("HCP32", "HID Check Point 32-bit", 32, vec![cn(3, 24)], vec![]),
        layout(
            "HPP32",
            "HID Hewlett-Packard 32-bit",
            32,
            vec![fc(1, 12), cn(13, 19)],
            vec![],
        ),
        kastle,
        layout(
            "Kantech",
            "Indala/Kantech KFS 32-bit",
            32,
            vec![fc(7, 8), cn(15, 16)],
            vec![],
        ),
        layout("WIE32", "Wiegand 32-bit", 32, vec![fc(4, 12), cn(16, 16)], vec![]),
        layout(
            "D10202",
            "HID D10202 33-bit",
            33,
            vec![fc(1, 7), cn(8, 24)],
            vec![ParityBit::even(0, span(1, 16)), ParityBit::odd(32, span(16, 16))],
        ),
        layout(
            "H10306",
            "HID H10306 34-bit",
            34,
            vec![fc(1, 16), cn(17, 16)],
            vec![ParityBit::even(0, span(1, 16)), ParityBit::odd(33, span(17, 16))],
        ),
        layout(
            "N10002",
            "Honeywell/Northern N10002 34-bit",
            34,
            vec![fc(9, 8), cn(17, 16)],
            vec![ParityBit::even(0, span(1, 16)), ParityBit::odd(33, span(17, 16))],
        ),
        layout(
            "Optus34",
            "Indala Optus 34-bit",
            34,
            vec![cn(1, 16), fc(22, 11)],
            vec![],
        ),
        layout(
            "SMP34",
            "Cardkey Smartpass 34-bit",
            34,
            vec![fc(1, 13), issue(14, 3), cn(17, 16)],
            vec![],
        ),
        layout(
            "BQT34",
            "BQT 34-bit",
            34,
            vec![fc(1, 8), cn(9, 24)],
            vec![ParityBit::even(0, span(1, 16)), ParityBit::odd(33, span(17, 16))],
        ),
        layout(
            "C1k35s",
            "HID Corporate 1000 35-bit std",
            35,
            vec![fc(2, 12), cn(14, 20)],
            vec![
                ParityBit::even(1, pairs(2, 34)),
                ParityBit::odd(34, pairs(1, 34)),
                ParityBit::odd(0, span(1, 34)),
            ],
        ),
        layout(
            "C15001",
            "HID KeyScan 36-bit",
            36,
            vec![oem(1, 10), fc(11, 8), cn(19, 16)],
            vec![ParityBit::even(0, span(1, 17)), ParityBit::odd(35, span(18, 17))],
        ),
        layout(
            "S12906",
            "HID Simplex 36-bit",
            36,
            vec![fc(1, 8), issue(9, 2), cn(11, 24)],
            vec![ParityBit::odd(0, span(1, 17)), ParityBit::odd(35, span(17, 18))],
        ),
        layout(
            "H10302",
            "HID H10302 37-bit huge ID",
            37,
            vec![cn(1, 35)],
            vec![ParityBit::even(0, span(1, 18)), ParityBit::odd(36, span(18, 18))],
        ),
        layout(
            "H10304",
            "HID H10304 37-bit",
            37,
            vec![fc(1, 16), cn(17, 19)],
            vec![ParityBit::even(0, span(1, 18)), ParityBit::odd(36, span(18, 18))],
        ),
        layout(
            "MDI37",
            "PointGuard MDI 37-bit",
            37,
            vec![fc(3, 4), cn(7, 29)],
            vec![ParityBit::even(0, span(1, 18)), ParityBit::odd(36, span(18, 18))],
        ),
        layout(
            "ISCS",
            "ISCS 38-bit",
            38,
            vec![oem(1, 4), fc(5, 10), cn(15, 22)],
            vec![ParityBit::even(0, span(1, 18)), ParityBit::odd(37, span(19, 18))],
        ),
        layout(
            "PW39",
            "Pyramid 39-bit",
            39,
            vec![fc(1, 17), cn(18, 20)],
            vec![ParityBit::even(0, span(1, 18)), ParityBit::odd(38, span(19, 19))],
        ),
        layout("Casi40", "Casi-Rusco 40-bit", 40, vec![cn(1, 38)], vec![]),
        layout(
            "C1k48s",
            "HID Corporate 1000 48-bit std",
            48,
            vec![fc(2, 22), cn(24, 23)],
            vec![
                ParityBit::even(1, pairs(2, 47)),
                ParityBit::odd(47, pairs(1, 47)),
                ParityBit::odd(0, span(1, 47)),
            ],
        ),
        layout(
            "Avig56",
            "Avigilon 56-bit",
            56,
            vec![fc(1, 20), cn(21, 34)],
            vec![ParityBit::even(0, span(1, 27)), ParityBit::odd(55, span(28, 27))],
        ),
    ]
}
