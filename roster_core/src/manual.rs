/*!

This is the long-form manual for `roster_core` and `rollcall`.

## Input formats

Names can come from:
* typed or pasted text (`--names`, or the `add` and `paste` commands of the shell)
* `docx` Word documents
* `xlsx` Excel workbooks

Any other file extension is refused with a message and the roster is left unchanged.

### Text

The text is cut into names at every line break, comma (`,` and `，`), ideographic
comma (`、`) and tab. Each piece is trimmed. A piece is kept only if it is made of
ideographs (U+4E00 to U+9FA5), ASCII letters and spaces, so numbers, punctuation
and empty lines are ignored. Zero-width characters and byte order marks are removed
first.

```text
王小明,李四	陳小華
123
王五
```

gives `王小明`, `李四`, `陳小華` and `王五`.

### `docx`

The text of every paragraph of the document body, one paragraph per line. Tables
work as well, each cell being its own paragraph.

### `xlsx`

Only the first worksheet is read. Every non-empty cell, read row by row, becomes
one line of text. Header cells such as `姓名` are names as far as the parser is
concerned and will be imported.

## Ordering

The roster is sorted after every import and every manual addition (but not after a
status change or a deletion):

1. by the stroke count of the first character. The stroke table only knows common
   surnames; other ideographs count as 20 strokes. Characters that are not ideographs
   count as their code point, so `A` weighs 65 and Latin names come after all the
   ideographs.
2. for the same weight, by the stroke-order Chinese collation of the full names, so
   `張一` comes before `張三` and `張偉`.
3. for the same name, by the order of insertion.

## Configuration

`rollcall` accepts a session file in JSON:

```json
{
  "outputSettings": {
    "sessionName": "一年甲班",
    "outputDirectory": "out",
    "outputFormat": "xlsx"
  },
  "sources": [{ "filePath": "students.xlsx" }, { "filePath": "late.docx" }],
  "names": "王小明,李四",
  "marks": [
    { "name": "王小明", "status": "present" },
    { "name": "李四", "status": "請假" }
  ]
}
```

- `sources` (optional): the documents to import, relative to the session file.
- `names` (optional): more names, as raw text.
- `marks` (optional): statuses to apply. `status` is one of `present`, `absent`,
  `leave`, `unset` or the labels `出席`, `請假`, `未到`. A mark applies to every entry
  with that name.
- `outputDirectory` (optional): where `點名結果.xlsx` is written. `--out` overrides it.
- `outputFormat` (optional, default `xlsx`): `xlsx` or `csv`.

## Export

The export has three columns `未到`, `請假`, `出席` listing the names with the
matching status in roster order, an empty row, and a summary row:

```text
總計: 出席: 1, 請假: 1, 未到: 0, 出席率: 33.33%
```

Entries without a status are not listed but count in the rate.

 */
