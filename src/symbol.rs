use serde::Serialize;

/// Stable handle to a variable in the [`SymbolTable`] arena.
///
/// Handles stay valid across hoisting and speculative-scope demotion: when two
/// entries are discovered to denote one logical variable, the obsolete entry
/// is linked to the survivor rather than removed, and [`SymbolTable::resolve`]
/// follows the chain. AST nodes store the handle they were parsed with.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct VarRef(u32);

/// Stable handle to a scope in the [`SymbolTable`] arena.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct ScopeRef(u32);

// Ordering matters: kinds at or above Lexical conflict with existing bindings
// on redeclaration.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum VarKind {
  // Used before any declaration was seen. Entries still undeclared at module
  // scope exit are implicit globals.
  Undeclared,
  // `var`.
  Var,
  // Function declaration name.
  Function,
  // Function or arrow parameter, or catch clause binding.
  Argument,
  // `let`, `const`, class declaration name, import binding.
  Lexical,
  // Function or class expression name, visible only inside the expression.
  Expr,
}

#[derive(Debug, Serialize)]
pub struct Var {
  pub name: String,
  pub kind: VarKind,
  // Number of AST sites that resolve to this variable, declaration sites
  // included. Maintained so a renamer can weigh variables by frequency.
  pub uses: u32,
  link: Option<VarRef>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
  pub parent: Option<ScopeRef>,
  // Nearest enclosing function (or module) scope; self for such scopes.
  pub func: ScopeRef,
  pub declared: Vec<VarRef>,
  pub undeclared: Vec<VarRef>,
  // Count of undeclared entries recorded while parsing this function's
  // parameter list. `var` declarations in the body must not merge with those
  // uses: in `function f(a = b) { var b }` the two `b`s are distinct.
  num_arg_uses: usize,
}

#[derive(Debug, Serialize)]
pub struct SymbolTable {
  vars: Vec<Var>,
  scopes: Vec<Scope>,
}

impl SymbolTable {
  pub fn new() -> SymbolTable {
    SymbolTable {
      vars: Vec::new(),
      scopes: Vec::new(),
    }
  }

  pub fn create_scope(&mut self, parent: Option<ScopeRef>, is_func: bool) -> ScopeRef {
    let r = ScopeRef(self.scopes.len() as u32);
    let func = if is_func {
      r
    } else {
      self.scopes[parent.unwrap().0 as usize].func
    };
    self.scopes.push(Scope {
      parent,
      func,
      declared: Vec::new(),
      undeclared: Vec::new(),
      num_arg_uses: 0,
    });
    r
  }

  pub fn scope(&self, r: ScopeRef) -> &Scope {
    &self.scopes[r.0 as usize]
  }

  fn scope_mut(&mut self, r: ScopeRef) -> &mut Scope {
    &mut self.scopes[r.0 as usize]
  }

  pub fn add_var(&mut self, kind: VarKind, name: String) -> VarRef {
    let r = VarRef(self.vars.len() as u32);
    self.vars.push(Var {
      name,
      kind,
      uses: 1,
      link: None,
    });
    r
  }

  /// Follows rebinding links to the surviving entry.
  pub fn resolve(&self, mut r: VarRef) -> VarRef {
    while let Some(l) = self.vars[r.0 as usize].link {
      r = l;
    }
    r
  }

  /// The resolved variable behind `r`.
  pub fn var(&self, r: VarRef) -> &Var {
    &self.vars[self.resolve(r).0 as usize]
  }

  pub fn name(&self, r: VarRef) -> &str {
    &self.var(r).name
  }

  fn var_mut(&mut self, r: VarRef) -> &mut Var {
    let r = self.resolve(r);
    &mut self.vars[r.0 as usize]
  }

  fn find_declared(&self, scope: ScopeRef, name: &str) -> Option<VarRef> {
    self
      .scope(scope)
      .declared
      .iter()
      .find(|&&v| self.var(v).name == name)
      .map(|&v| self.resolve(v))
  }

  fn find_undeclared(&self, scope: ScopeRef, name: &str) -> Option<VarRef> {
    self
      .scope(scope)
      .undeclared
      .iter()
      .find(|&&v| self.var(v).name == name)
      .map(|&v| self.resolve(v))
  }

  /// Links `from` to `to`, transferring accumulated uses.
  fn link(&mut self, from: VarRef, to: VarRef) {
    let from = self.resolve(from);
    let to = self.resolve(to);
    if from == to {
      return;
    }
    let transferred = self.vars[from.0 as usize].uses;
    self.vars[to.0 as usize].uses += transferred;
    self.vars[from.0 as usize].link = Some(to);
  }

  /// Declares `name` in `scope`. `Var` and `Function` kinds target the
  /// nearest function scope. Returns `None` on a conflicting redeclaration.
  pub fn declare(&mut self, scope: ScopeRef, kind: VarKind, name: &str) -> Option<VarRef> {
    let target = if matches!(kind, VarKind::Var | VarKind::Function) {
      self.scope(scope).func
    } else {
      scope
    };

    if let Some(v) = self.find_declared(target, name) {
      let existing = self.var(v).kind;
      if (kind >= VarKind::Lexical || existing >= VarKind::Lexical) && existing != VarKind::Expr {
        return None;
      }
      if existing == VarKind::Expr {
        self.var_mut(v).kind = kind;
      }
      self.var_mut(v).uses += 1;
      // Record the variable in the scopes between the declaration site and the
      // function scope it lives in, so each knows the name is taken.
      let mut cur = scope;
      while cur != target {
        self.scope_mut(cur).undeclared.push(v);
        cur = self.scope(cur).parent.unwrap();
      }
      return Some(v);
    }

    // A previously recorded free use of the same name in the target scope is
    // the same variable (`a; var a`). Uses recorded during the parameter list
    // (below num_arg_uses) are excluded.
    let mut reused = None;
    if kind != VarKind::Argument {
      let from = self.scope(target).num_arg_uses;
      let pos = self.scope(target).undeclared[from..].iter().position(|&u| {
        let uv = self.var(u);
        uv.kind == VarKind::Undeclared && uv.uses > 0 && uv.name == name
      });
      if let Some(pos) = pos {
        reused = Some(self.scope_mut(target).undeclared.remove(from + pos));
      }
    }

    let v = match reused {
      Some(v) => {
        let v = self.resolve(v);
        self.var_mut(v).kind = kind;
        self.var_mut(v).uses += 1;
        v
      }
      None => self.add_var(kind, name.to_string()),
    };
    self.scope_mut(target).declared.push(v);
    Some(v)
  }

  /// Records a use of `name` in `scope`, resolving against this scope only;
  /// uses of enclosing scopes' bindings resolve at scope exit via
  /// [`SymbolTable::hoist_undeclared`].
  pub fn use_var(&mut self, scope: ScopeRef, name: &str) -> VarRef {
    if let Some(v) = self.find_declared(scope, name) {
      self.var_mut(v).uses += 1;
      return v;
    }
    if let Some(v) = self.find_undeclared(scope, name) {
      self.var_mut(v).uses += 1;
      return v;
    }
    let v = self.add_var(VarKind::Undeclared, name.to_string());
    self.scope_mut(scope).undeclared.push(v);
    v
  }

  /// Called when a function's parameter list has been parsed, so that free
  /// uses inside parameter defaults never merge with `var` declarations in
  /// the body.
  pub fn mark_arguments(&mut self, scope: ScopeRef) {
    self.scope_mut(scope).num_arg_uses = self.scope(scope).undeclared.len();
  }

  /// Merges still-undeclared entries of `scope` into its parent: rebind to a
  /// matching parent entry, or propagate. Called once when the parser exits
  /// the scope; resolution thus cascades one level at a time.
  pub fn hoist_undeclared(&mut self, scope: ScopeRef) {
    let Some(parent) = self.scope(scope).parent else {
      return;
    };
    let undeclared = self.scope(scope).undeclared.clone();
    for u in undeclared {
      let r = self.resolve(u);
      let uv = &self.vars[r.0 as usize];
      if uv.kind != VarKind::Undeclared || uv.uses == 0 {
        continue;
      }
      let name = uv.name.clone();
      if let Some(p) = self.find_declared(parent, &name) {
        self.link(r, p);
      } else if let Some(p) = self.find_undeclared(parent, &name) {
        self.link(r, p);
      } else {
        self.scope_mut(parent).undeclared.push(r);
      }
    }
  }

  /// Demotes a rejected speculative arrow scope: every variable it declared
  /// becomes an ordinary use in the parent scope. The scope's own undeclared
  /// entries must already have been hoisted.
  pub fn undeclare_scope(&mut self, scope: ScopeRef) {
    let parent = self.scope(scope).parent.unwrap();
    let declared = std::mem::take(&mut self.scope_mut(scope).declared);
    for v in declared {
      let r = self.resolve(v);
      let name = self.vars[r.0 as usize].name.clone();
      if let Some(p) = self.find_declared(parent, &name) {
        self.link(r, p);
      } else if let Some(p) = self.find_undeclared(parent, &name) {
        self.link(r, p);
      } else {
        self.vars[r.0 as usize].kind = VarKind::Undeclared;
        self.scope_mut(parent).undeclared.push(r);
      }
    }
  }

  /// Reclassifies the sole parameter of `x => …` once the arrow is
  /// confirmed. `r` was recorded as a use in the parent of `scope` (the
  /// arrow's fresh function scope) while the identifier still looked like an
  /// expression; that expression node is discarded by the caller.
  pub fn rebind_as_argument(&mut self, scope: ScopeRef, r: VarRef) -> VarRef {
    let r = self.resolve(r);
    if self.vars[r.0 as usize].uses > 1 {
      // Entangled with an outer binding or earlier uses; leave it there and
      // declare a fresh parameter that shadows it.
      self.vars[r.0 as usize].uses -= 1;
      let name = self.vars[r.0 as usize].name.clone();
      self.declare(scope, VarKind::Argument, &name).unwrap()
    } else {
      // Freshly created by the identifier's own use, so it is the most recent
      // undeclared entry of the parent. Move it into the arrow scope.
      let parent = self.scope(scope).parent.unwrap();
      let popped = self.scope_mut(parent).undeclared.pop();
      debug_assert_eq!(popped.map(|p| self.resolve(p)), Some(r));
      self.vars[r.0 as usize].kind = VarKind::Argument;
      self.scope_mut(scope).declared.push(r);
      r
    }
  }
}

impl Default for SymbolTable {
  fn default() -> Self {
    Self::new()
  }
}
