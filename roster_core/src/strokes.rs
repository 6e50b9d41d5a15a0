//! Stroke counts used as the primary ordering weight of a name.
//!
//! The table is partial: it mostly covers common surnames written in
//! traditional characters. Ideographs missing from it resolve to
//! `UNKNOWN_STROKES`, everything outside the ideograph block resolves to its
//! code point, so Latin names sort after all ideographs.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The weight of an ideograph that is missing from the table.
pub const UNKNOWN_STROKES: u32 = 20;

/// The first and last code points considered as ideographs.
pub const CJK_FIRST: char = '\u{4E00}';
pub const CJK_LAST: char = '\u{9FA5}';

const STROKE_DATA: &[(char, u32)] = &[
    ('一', 1),
    ('丁', 2),
    ('七', 2),
    ('九', 2),
    ('卜', 2),
    ('刁', 2),
    ('于', 3),
    ('上', 3),
    ('千', 3),
    ('弓', 3),
    ('山', 3),
    ('王', 4),
    ('方', 4),
    ('孔', 4),
    ('尹', 4),
    ('文', 4),
    ('毛', 4),
    ('牛', 4),
    ('元', 4),
    ('卞', 4),
    ('巴', 4),
    ('尤', 4),
    ('白', 5),
    ('石', 5),
    ('田', 5),
    ('史', 5),
    ('左', 5),
    ('甘', 5),
    ('包', 5),
    ('古', 5),
    ('司', 5),
    ('申', 5),
    ('皮', 5),
    ('丘', 5),
    ('朱', 6),
    ('江', 6),
    ('任', 6),
    ('向', 6),
    ('安', 6),
    ('曲', 6),
    ('牟', 6),
    ('伍', 6),
    ('米', 6),
    ('全', 6),
    ('池', 6),
    ('李', 7),
    ('吳', 7),
    ('何', 7),
    ('呂', 7),
    ('宋', 7),
    ('杜', 7),
    ('余', 7),
    ('汪', 7),
    ('沈', 7),
    ('巫', 7),
    ('谷', 7),
    ('車', 7),
    ('辛', 7),
    ('阮', 7),
    ('貝', 7),
    ('林', 8),
    ('周', 8),
    ('金', 8),
    ('邱', 8),
    ('孟', 8),
    ('季', 8),
    ('官', 8),
    ('武', 8),
    ('卓', 8),
    ('岳', 8),
    ('易', 8),
    ('屈', 8),
    ('房', 8),
    ('邵', 8),
    ('宗', 8),
    ('杭', 8),
    ('尚', 8),
    ('胡', 9),
    ('施', 9),
    ('洪', 9),
    ('姚', 9),
    ('柯', 9),
    ('侯', 9),
    ('姜', 9),
    ('紀', 9),
    ('俞', 9),
    ('韋', 9),
    ('秋', 9),
    ('查', 9),
    ('宣', 9),
    ('柳', 9),
    ('段', 9),
    ('封', 9),
    ('徐', 10),
    ('孫', 10),
    ('翁', 10),
    ('高', 10),
    ('馬', 10),
    ('袁', 10),
    ('夏', 10),
    ('唐', 10),
    ('殷', 10),
    ('秦', 10),
    ('倪', 10),
    ('凌', 10),
    ('時', 10),
    ('柴', 10),
    ('席', 10),
    ('晏', 10),
    ('涂', 10),
    ('張', 11),
    ('許', 11),
    ('梁', 11),
    ('陳', 11),
    ('陸', 11),
    ('章', 11),
    ('曹', 11),
    ('康', 11),
    ('崔', 11),
    ('麥', 11),
    ('常', 11),
    ('郭', 11),
    ('陶', 11),
    ('黃', 12),
    ('彭', 12),
    ('曾', 12),
    ('程', 12),
    ('馮', 12),
    ('游', 12),
    ('童', 12),
    ('傅', 12),
    ('焦', 12),
    ('湯', 12),
    ('項', 12),
    ('費', 12),
    ('喬', 12),
    ('賀', 12),
    ('楊', 13),
    ('詹', 13),
    ('雷', 13),
    ('溫', 13),
    ('賈', 13),
    ('鄒', 13),
    ('楚', 13),
    ('虞', 13),
    ('路', 13),
    ('廉', 13),
    ('趙', 14),
    ('廖', 14),
    ('熊', 14),
    ('管', 14),
    ('齊', 14),
    ('裴', 14),
    ('壽', 14),
    ('翟', 14),
    ('臧', 14),
    ('甄', 14),
    ('聞', 14),
    ('劉', 15),
    ('鄭', 15),
    ('潘', 15),
    ('黎', 15),
    ('歐', 15),
    ('樊', 15),
    ('魯', 15),
    ('談', 15),
    ('鄧', 15),
    ('龍', 16),
    ('龜', 16),
    ('錢', 16),
    ('盧', 16),
    ('賴', 16),
    ('駱', 16),
    ('霍', 16),
    ('鮑', 16),
    ('諸', 16),
    ('穆', 16),
    ('閻', 16),
    ('謝', 17),
    ('鍾', 17),
    ('韓', 17),
    ('應', 17),
    ('戴', 17),
    ('鞠', 17),
    ('繆', 17),
    ('顏', 18),
    ('魏', 18),
    ('簡', 18),
    ('聶', 18),
    ('豐', 18),
    ('闕', 18),
    ('羅', 19),
    ('譚', 19),
    ('關', 19),
    ('龐', 19),
    ('嚴', 20),
    ('鐘', 20),
    ('顧', 21),
    ('龔', 22),
];

static STROKE_TABLE: Lazy<HashMap<char, u32>> =
    Lazy::new(|| STROKE_DATA.iter().cloned().collect());

/// True for the ideograph block that the stroke table is keyed on.
pub fn is_cjk(c: char) -> bool {
    (CJK_FIRST..=CJK_LAST).contains(&c)
}

/// The ordering weight of a single character.
///
/// Never fails: ideographs missing from the table get `UNKNOWN_STROKES`,
/// other characters get their code point value.
pub fn resolve(c: char) -> u32 {
    if is_cjk(c) {
        STROKE_TABLE.get(&c).cloned().unwrap_or(UNKNOWN_STROKES)
    } else {
        c as u32
    }
}

/// The weight of a name: only its first character (the surname) counts.
/// An empty name weighs 0.
pub fn name_strokes(name: &str) -> u32 {
    name.chars().next().map(resolve).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_ideographs() {
        assert_eq!(resolve('一'), 1);
        assert_eq!(resolve('王'), 4);
        assert_eq!(resolve('李'), 7);
        assert_eq!(resolve('張'), 11);
        assert_eq!(resolve('龍'), 16);
    }

    #[test]
    fn unknown_ideograph_falls_back() {
        // 乙 is in the block but not in the table.
        assert_eq!(resolve('乙'), UNKNOWN_STROKES);
        assert_eq!(resolve(CJK_LAST), UNKNOWN_STROKES);
    }

    #[test]
    fn outside_the_block_is_the_code_point() {
        assert_eq!(resolve('A'), 65);
        assert_eq!(resolve('a'), 97);
        assert_eq!(resolve(' '), 32);
        // Just past the block.
        assert_eq!(resolve('\u{9FA6}'), 0x9FA6);
        assert_eq!(resolve('\u{3400}'), 0x3400);
    }

    #[test]
    fn deterministic() {
        for c in ['王', '乙', 'z', '😀'] {
            assert_eq!(resolve(c), resolve(c));
        }
    }

    #[test]
    fn only_the_first_character_counts() {
        assert_eq!(name_strokes("王小明"), 4);
        assert_eq!(name_strokes("王"), 4);
        assert_eq!(name_strokes("Amy"), 65);
        assert_eq!(name_strokes(""), 0);
    }

    #[test]
    fn table_has_no_conflicting_entries() {
        let mut seen = HashSet::new();
        for (c, n) in STROKE_DATA {
            assert!(is_cjk(*c), "{} is outside the block", c);
            assert!(*n > 0);
            assert!(seen.insert(*c), "{} is listed twice", c);
        }
    }
}
