/*!

This is the long-form manual for `election_ids` and the `electid` command
line tool.

## Identifier format

Identifiers are dot-delimited, ASCII and lowercase. Every segment other
than the date matches `[-_a-z0-9]+`; the date segment is always present,
always last and always `YYYY-MM-DD`. There are four hierarchy levels, from
least to most specific:

* election group: `local.2018-05-03`
* subtype group: `sp.c.2018-05-03`
* organisation group: `local.test-org.2018-05-03`
* ballot: `local.test-org.test-ward.2018-05-03`

For a by-election, the marker `by` is inserted into the ballot id just
before the date: `local.test-org.test-ward.by.2018-05-03`.

Which segments may appear, and which are mandatory for a ballot id,
depends on the election type:

| type    | subtypes  | organisation | division        |
|---------|-----------|--------------|-----------------|
| `parl`  | none      | no           | yes             |
| `nia`   | none      | no           | yes             |
| `naw`   | `c`, `r`  | no           | yes             |
| `sp`    | `c`, `r`  | no           | yes             |
| `gla`   | `c`, `a`  | no           | only under `c`  |
| `local` | none      | yes          | yes             |
| `pcc`   | none      | yes          | no              |
| `mayor` | none      | yes          | no              |

`ref` and `eu` are reserved keys without an implemented grammar.

## Command line usage

Print every identifier that can be built from a set of inputs:

```bash
electid local --date 2018-05-03 --organisation 'Test Org' --division 'Test Ward'
```

```text
local.2018-05-03
local.test-org.2018-05-03
local.test-org.test-ward.2018-05-03
```

Levels whose inputs are incomplete are skipped, not reported as errors;
pass `--level ballot` (or `group`, `subtype-group`, `organisation-group`)
to request one specific level and get a hard error instead.

## Custom datapackages

`--datapackage <path>` replaces the built-in table with a JSON one. The
shape follows the original `uk_election_ids` datapackage:

```json
{
    "local": {
        "name": "Local Elections",
        "subtypes": [],
        "default_voting_system": "FPTP",
        "can_have_orgs": true,
        "can_have_divs": true
    },
    "gla": {
        "name": "Greater London Assembly Elections",
        "subtypes": [
            {"name": "Constituencies", "election_subtype": "c", "can_have_divs": true},
            {"name": "Additional", "election_subtype": "a", "can_have_divs": false}
        ],
        "default_voting_system": "AMS",
        "can_have_orgs": false
    }
}
```

`can_have_orgs` and `can_have_divs` may be set once per type, or omitted
there and set on every subtype. A file with neither form for some type is
rejected before any identifier is built.

*/
