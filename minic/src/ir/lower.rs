use crate::grammer::ast;
use crate::ir::{Counters, Inst, Operand, Place};

pub fn lower(program: &ast::Program) -> Vec<Inst> {
    let mut ctx = Context::new();
    for stmt in &program.statements {
        ctx.lower_stmt(stmt);
    }
    ctx.code
}

struct Context {
    counters: Counters,
    code: Vec<Inst>,
}

impl Context {
    fn new() -> Self {
        Self {
            counters: Counters::new(),
            code: Vec::new(),
        }
    }

    fn emit(&mut self, inst: Inst) {
        self.code.push(inst);
    }

    fn lower_stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::Declaration {
                var_type,
                variable,
                value,
            } => {
                self.emit(Inst::Declare {
                    ty: var_type.clone(),
                    name: variable.clone(),
                });

                // A literal initializer goes through a temporary first
                let src = match value {
                    ast::Expr::Number { value } => {
                        let temp = self.counters.fresh_temp();
                        self.emit(Inst::Assign {
                            dest: Place::Temp(temp),
                            src: Operand::Const(value.clone()),
                        });
                        Operand::Temp(temp)
                    }
                    expr => self.lower_expr(expr),
                };
                self.emit(Inst::Assign {
                    dest: Place::Var(variable.clone()),
                    src,
                });
            }

            ast::Stmt::Assignment { variable, value } => {
                let src = self.lower_expr(value);
                self.emit(Inst::Assign {
                    dest: Place::Var(variable.clone()),
                    src,
                });
            }

            ast::Stmt::If {
                condition,
                then,
                otherwise,
            } => {
                let cond = self.lower_expr(condition);
                let true_label = self.counters.fresh_label();
                let false_label = self.counters.fresh_label();

                self.emit(Inst::CondJump {
                    cond,
                    label: true_label,
                });
                self.emit(Inst::Jump(false_label));

                self.emit(Inst::Label(true_label));
                for s in then {
                    self.lower_stmt(s);
                }
                self.emit(Inst::Jump(false_label));

                // Both branches meet here
                self.emit(Inst::Label(false_label));
                for s in otherwise {
                    self.lower_stmt(s);
                }
            }

            ast::Stmt::Return { expression } => {
                let operand = self.lower_expr(expression);
                self.emit(Inst::Return(operand));
            }
        }
    }

    fn lower_expr(&mut self, expr: &ast::Expr) -> Operand {
        match expr {
            ast::Expr::Identifier { name } => Operand::Var(name.clone()),

            ast::Expr::Number { value } => Operand::Const(value.clone()),

            ast::Expr::Binary {
                operator,
                left,
                right,
            } => {
                let lhs = self.lower_expr(left);
                let rhs = self.lower_expr(right);
                let temp = self.counters.fresh_temp();
                self.emit(Inst::BinaryAssign {
                    dest: Place::Temp(temp),
                    lhs,
                    op: *operator,
                    rhs,
                });
                Operand::Temp(temp)
            }
        }
    }
}
