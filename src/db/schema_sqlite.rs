// SQLite stores INTEGER PRIMARY KEY as a 64-bit rowid.

diesel::table! {
    items (id) {
        id -> BigInt,
        name -> Text,
    }
}
