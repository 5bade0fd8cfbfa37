error_chain! {
    links {
        Ccov(::ccov::error::Error, ::ccov::error::ErrorKind);
    }

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        Usage(program: String) {
            description("missing LOG or SRC argument")
            display("{} LOG SRC", program)
        }
    }
}
