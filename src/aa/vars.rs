use std::collections::HashMap;

/// The dense Boolean-variable id allocator and lookup tables described in the data
/// model: every table maps a semantic object (an argument, an attack pair, a level) to
/// the id of the Boolean variable that represents it. Variable ids are contiguous,
/// starting at 1, and allocated in the order callers first ask for them — this is what
/// gives WCNF/LP output its stability across runs on the same input.
#[derive(Debug, Default, Clone)]
pub struct VariableTables {
    next_var: usize,

    att_var: HashMap<(usize, usize), usize>,
    arg_var: HashMap<usize, usize>,
    attack_var: HashMap<(usize, usize), usize>,
    attacked_var: HashMap<(usize, usize), usize>,
    range_var: HashMap<usize, usize>,
    defend_var: HashMap<usize, usize>,

    level_var: HashMap<(usize, usize), usize>,
    level_attack_var: HashMap<(usize, (usize, usize)), usize>,
    level_not_defended_var: HashMap<(usize, (usize, usize)), usize>,

    /// `arg_var[(t, x)]`: per-target witness membership for status enforcement, kept in
    /// a separately named field so it does not collide with the extension-enforcement
    /// `argVar` table above.
    status_arg_var: HashMap<(usize, usize), usize>,
    /// `att_var[(t, (k, j))]`: per-target witness attack-presence relay.
    status_att_var: HashMap<(usize, (usize, usize)), usize>,
}

macro_rules! table_accessors {
    ($field:ident, $get:ident, $insert:ident, $key:ty) => {
        pub fn $get(&self, key: $key) -> Option<usize> {
            self.$field.get(&key).copied()
        }

        pub fn $insert(&mut self, key: $key) -> usize {
            if let Some(v) = self.$field.get(&key) {
                return *v;
            }
            let v = self.alloc();
            self.$field.insert(key, v);
            v
        }
    };
}

impl VariableTables {
    pub fn new() -> Self {
        VariableTables {
            next_var: 1,
            ..Default::default()
        }
    }

    /// Number of variables allocated so far (i.e. the next id minus one).
    pub fn n_vars(&self) -> usize {
        self.next_var - 1
    }

    fn alloc(&mut self) -> usize {
        let v = self.next_var;
        self.next_var += 1;
        v
    }

    table_accessors!(att_var, att_var, att_var_or_insert, (usize, usize));
    table_accessors!(arg_var, arg_var, arg_var_or_insert, usize);
    table_accessors!(attack_var, attack_var, attack_var_or_insert, (usize, usize));
    table_accessors!(
        attacked_var,
        attacked_var,
        attacked_var_or_insert,
        (usize, usize)
    );
    table_accessors!(range_var, range_var, range_var_or_insert, usize);
    table_accessors!(defend_var, defend_var, defend_var_or_insert, usize);
    table_accessors!(level_var, level_var, level_var_or_insert, (usize, usize));
    table_accessors!(
        level_attack_var,
        level_attack_var,
        level_attack_var_or_insert,
        (usize, (usize, usize))
    );
    table_accessors!(
        level_not_defended_var,
        level_not_defended_var,
        level_not_defended_var_or_insert,
        (usize, (usize, usize))
    );
    table_accessors!(
        status_arg_var,
        status_arg_var,
        status_arg_var_or_insert,
        (usize, usize)
    );
    table_accessors!(
        status_att_var,
        status_att_var,
        status_att_var_or_insert,
        (usize, (usize, usize))
    );
}
